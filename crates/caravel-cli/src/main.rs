//! caravel — staged bootstrap of a Confluent Kafka topology.
//!
//! Assumes the nodes are already provisioned (containers running, network
//! wired, image pulled); this binary only brings the services online in
//! dependency order and verifies liveness between stages.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod telemetry;

use caravel_agent::DockerAgent;
use caravel_bootstrap::{BootstrapOrchestrator, NodeRoster, TracingObserver};

const DEFAULT_NAMESPACE: &str = "clusterdock";

/// Bootstrap a ZooKeeper + Kafka + Schema Registry topology
#[derive(Parser)]
#[command(name = "caravel")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Hostname of a cluster node; repeat once per node, in roster order
    #[arg(short, long = "node", value_name = "HOSTNAME", required = true)]
    nodes: Vec<String>,

    /// Image registry the topology image was provisioned from
    #[arg(long, default_value = "docker.io")]
    registry: String,

    /// Image namespace
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Confluent Platform version tag
    #[arg(long, default_value = "latest")]
    confluent_version: String,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Image reference the nodes were provisioned from, logged for
    /// operator visibility.
    fn image(&self) -> String {
        format!(
            "{}/{}/topology_confluent_schema_registry:schema_registry-{}",
            self.registry, self.namespace, self.confluent_version
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(if cli.verbose { "debug" } else { "info" });

    info!(image = %cli.image(), nodes = cli.nodes.len(), "Bootstrapping Kafka topology");

    let roster = NodeRoster::new(cli.nodes.iter().cloned());
    let agents: Vec<DockerAgent> = cli.nodes.iter().map(|h| DockerAgent::new(h.as_str())).collect();

    let orchestrator = BootstrapOrchestrator::new(roster, agents)?
        .with_observer(Arc::new(TracingObserver));
    orchestrator.run().await?;

    info!("Bootstrap complete; all services launched");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_reference_composition() {
        let cli = Cli::parse_from([
            "caravel",
            "--node",
            "kafka-0",
            "--registry",
            "ghcr.io",
            "--confluent-version",
            "7.6.0",
        ]);
        assert_eq!(
            cli.image(),
            "ghcr.io/clusterdock/topology_confluent_schema_registry:schema_registry-7.6.0"
        );
    }

    #[test]
    fn test_nodes_repeatable_in_order() {
        let cli = Cli::parse_from(["caravel", "-n", "h0", "-n", "h1", "-n", "h2"]);
        assert_eq!(cli.nodes, ["h0", "h1", "h2"]);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_at_least_one_node_required() {
        assert!(Cli::try_parse_from(["caravel"]).is_err());
    }
}
