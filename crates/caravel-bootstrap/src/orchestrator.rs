//! Staged bootstrap state machine.
//!
//! Stages are strictly sequential with no backward transitions; each must
//! complete across the entire roster before the next starts. Side effects
//! are additive only — a failure mid-stage leaves that stage partially
//! applied and unwinds without rollback or cleanup of remote processes.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use caravel_agent::NodeAgent;

use crate::config;
use crate::constants::paths;
use crate::error::{BootstrapError, Result};
use crate::observer::{BootstrapObserver, NullObserver};
use crate::poll::{wait_for, WaitError};
use crate::readiness;
use crate::roster::{Node, NodeRoster};

/// Bootstrap pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    EnsembleStart,
    EnsembleGate,
    BrokerStart,
    BrokerGate,
    RegistryStart,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::EnsembleStart => "ensemble start",
            Stage::EnsembleGate => "ensemble readiness gate",
            Stage::BrokerStart => "broker start",
            Stage::BrokerGate => "broker readiness gate",
            Stage::RegistryStart => "schema registry start",
        };
        f.write_str(name)
    }
}

/// Poll interval and timeout budget applied to each readiness gate.
#[derive(Debug, Clone, Copy)]
pub struct GateSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Drives a roster of nodes through the five bootstrap stages.
pub struct BootstrapOrchestrator<A> {
    roster: NodeRoster,
    agents: Vec<A>,
    gates: GateSettings,
    observer: Arc<dyn BootstrapObserver>,
}

impl<A: NodeAgent> BootstrapOrchestrator<A> {
    /// Pair the roster with one agent per node, in roster order.
    pub fn new(roster: NodeRoster, agents: Vec<A>) -> Result<Self> {
        if roster.len() != agents.len() {
            return Err(BootstrapError::RosterMismatch {
                nodes: roster.len(),
                agents: agents.len(),
            });
        }
        Ok(Self {
            roster,
            agents,
            gates: GateSettings::default(),
            observer: Arc::new(NullObserver),
        })
    }

    pub fn with_gates(mut self, gates: GateSettings) -> Self {
        self.gates = gates;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn BootstrapObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run the full pipeline. The first fatal error aborts everything
    /// still pending; there is no partial-success continuation.
    pub async fn run(&self) -> Result<()> {
        self.start_ensemble().await?;
        self.await_ensemble().await?;
        self.start_brokers().await?;
        self.await_brokers().await?;
        self.start_registries().await
    }

    /// Stage 1: lay down per-node ensemble state and launch the
    /// membership service everywhere, fire-and-forget.
    async fn start_ensemble(&self) -> Result<()> {
        let stage = Stage::EnsembleStart;
        self.observer.stage_started(stage);

        let ensemble_config = config::build_ensemble_config(&self.roster);

        for (node, agent) in self.pairs() {
            self.observer.node_step(stage, node, "Starting ZooKeeper");
            // Exit codes are not inspected during start stages; readiness
            // is established only by the gates.
            agent
                .execute(&format!("mkdir -p {}", paths::ZOOKEEPER_DATA_DIR))
                .await
                .map_err(|source| BootstrapError::Agent { stage, source })?;
            agent
                .put_file(paths::ZOOKEEPER_MYID, &node.index.to_string())
                .await
                .map_err(|source| BootstrapError::Agent { stage, source })?;
            agent
                .put_file(paths::ZOOKEEPER_CONFIG, &ensemble_config)
                .await
                .map_err(|source| BootstrapError::Agent { stage, source })?;
            agent
                .execute_detached(paths::START_ZOOKEEPER)
                .await
                .map_err(|source| BootstrapError::Agent { stage, source })?;
        }
        Ok(())
    }

    /// Stage 2: block until every node's membership service answers the
    /// shell protocol. The first timeout anywhere aborts the bootstrap.
    async fn await_ensemble(&self) -> Result<()> {
        let stage = Stage::EnsembleGate;
        self.observer.stage_started(stage);

        for (node, agent) in self.pairs() {
            self.observer.node_step(stage, node, "Validating ZooKeeper");
            let elapsed = wait_for(
                || readiness::ensemble_ready(agent),
                self.gates.interval,
                self.gates.timeout,
            )
            .await
            .map_err(|e| self.gate_error(stage, e))?;
            self.observer.gate_satisfied(stage, elapsed);
        }
        Ok(())
    }

    /// Stage 3: fetch each node's broker template, patch in its
    /// roster-derived identity, upload, and launch the broker detached.
    async fn start_brokers(&self) -> Result<()> {
        let stage = Stage::BrokerStart;
        self.observer.stage_started(stage);

        for (node, agent) in self.pairs() {
            self.observer.node_step(stage, node, "Starting Kafka");
            let template = agent
                .get_file(paths::BROKER_TEMPLATE)
                .await
                .map_err(|source| BootstrapError::Agent { stage, source })?;
            let patched = config::patch_broker_config(&template, node.index)?;
            agent
                .put_file(paths::BROKER_CONFIG, &patched)
                .await
                .map_err(|source| BootstrapError::Agent { stage, source })?;
            agent
                .execute_detached(paths::START_KAFKA)
                .await
                .map_err(|source| BootstrapError::Agent { stage, source })?;
        }
        Ok(())
    }

    /// Stage 4: one global gate against the first roster node. Brokers
    /// register themselves into the shared coordination namespace, so a
    /// single observation point suffices.
    async fn await_brokers(&self) -> Result<()> {
        let stage = Stage::BrokerGate;
        self.observer.stage_started(stage);

        let (Some(node), Some(agent)) = (self.roster.first(), self.agents.first()) else {
            return Ok(());
        };
        let expected = self.roster.len();
        self.observer
            .node_step(stage, node, "Waiting on all brokers to register");
        let elapsed = wait_for(
            || readiness::brokers_registered(agent, expected),
            self.gates.interval,
            self.gates.timeout,
        )
        .await
        .map_err(|e| self.gate_error(stage, e))?;
        self.observer.gate_satisfied(stage, elapsed);
        Ok(())
    }

    /// Stage 5: launch the dependent service everywhere. No gate follows;
    /// the bootstrap ends once the last dispatch is issued.
    async fn start_registries(&self) -> Result<()> {
        let stage = Stage::RegistryStart;
        self.observer.stage_started(stage);

        for (node, agent) in self.pairs() {
            self.observer
                .node_step(stage, node, "Starting Schema Registry");
            agent
                .execute_detached(paths::START_SCHEMA_REGISTRY)
                .await
                .map_err(|source| BootstrapError::Agent { stage, source })?;
        }
        Ok(())
    }

    fn gate_error(&self, stage: Stage, err: WaitError<caravel_agent::AgentError>) -> BootstrapError {
        match err {
            WaitError::TimedOut { timeout } => BootstrapError::TimedOut { stage, timeout },
            WaitError::Condition(source) => BootstrapError::Agent { stage, source },
        }
    }

    fn pairs(&self) -> impl Iterator<Item = (&Node, &A)> {
        self.roster.iter().zip(&self.agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::NodeRoster;

    #[test]
    fn test_roster_agent_count_must_match() {
        let roster = NodeRoster::new(["h0", "h1"]);
        let agents: Vec<caravel_agent::DockerAgent> =
            vec![caravel_agent::DockerAgent::new("h0")];
        let err = match BootstrapOrchestrator::new(roster, agents) {
            Ok(_) => panic!("mismatched roster must be rejected"),
            Err(e) => e,
        };
        assert!(matches!(
            err,
            BootstrapError::RosterMismatch { nodes: 2, agents: 1 }
        ));
    }

    #[test]
    fn test_stage_display_names() {
        assert_eq!(Stage::EnsembleStart.to_string(), "ensemble start");
        assert_eq!(Stage::BrokerGate.to_string(), "broker readiness gate");
    }

    #[test]
    fn test_default_gate_settings() {
        let gates = GateSettings::default();
        assert_eq!(gates.interval, Duration::from_secs(3));
        assert_eq!(gates.timeout, Duration::from_secs(60));
    }
}
