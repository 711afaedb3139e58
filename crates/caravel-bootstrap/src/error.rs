//! Error taxonomy for the bootstrap pipeline.

use std::time::Duration;

use caravel_agent::AgentError;
use thiserror::Error;

use crate::orchestrator::Stage;

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Fatal bootstrap failures. None of these are retried: each unwinds to
/// the caller and terminates the pipeline, leaving the current stage
/// partially applied.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A readiness gate did not observe success within its timeout budget.
    #[error("{stage} timed out after {}s", .timeout.as_secs())]
    TimedOut { stage: Stage, timeout: Duration },

    /// A remote operation could not be dispatched or a transfer failed.
    #[error("{stage}: {source}")]
    Agent {
        stage: Stage,
        #[source]
        source: AgentError,
    },

    /// An expected pattern was absent while patching fetched configuration.
    #[error("configuration shape mismatch: {0}")]
    ConfigShape(String),

    /// Roster and agent list do not pair up one-to-one.
    #[error("roster has {nodes} nodes but {agents} agents were supplied")]
    RosterMismatch { nodes: usize, agents: usize },
}
