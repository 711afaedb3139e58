//! Progress observation.
//!
//! The orchestrator reports progress through an injected observer instead
//! of a process-global logger, so tests capture the event stream without
//! any shared mutable state. The CLI installs [`TracingObserver`].

use std::time::Duration;

use tracing::info;

use crate::orchestrator::Stage;
use crate::roster::Node;

/// Receives bootstrap progress events. All methods are informational and
/// default to no-ops; implementations must not block.
pub trait BootstrapObserver: Send + Sync {
    fn stage_started(&self, _stage: Stage) {}

    /// A per-node step within a stage was dispatched.
    fn node_step(&self, _stage: Stage, _node: &Node, _action: &str) {}

    /// A readiness gate observed success after `elapsed`.
    fn gate_satisfied(&self, _stage: Stage, _elapsed: Duration) {}
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl BootstrapObserver for NullObserver {}

/// Observer that emits structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BootstrapObserver for TracingObserver {
    fn stage_started(&self, stage: Stage) {
        info!(%stage, "Stage started");
    }

    fn node_step(&self, stage: Stage, node: &Node, action: &str) {
        info!(%stage, hostname = %node.hostname, index = node.index, "{action}");
    }

    fn gate_satisfied(&self, stage: Stage, elapsed: Duration) {
        info!(%stage, elapsed_secs = elapsed.as_secs_f64(), "Conditions satisfied");
    }
}
