//! Readiness predicates polled by the stage gates.
//!
//! Both checks go through the ZooKeeper shell on the node itself, so they
//! observe exactly what the cluster's own coordination namespace reports.
//! A command that runs and fails is "not yet ready"; a dispatch that fails
//! outright propagates and aborts the wait.

use caravel_agent::{NodeAgent, Result};

use crate::constants::{paths, ports, BROKER_IDS_PATH};

/// True once the membership service on a node answers the shell protocol.
///
/// This checks responsiveness only, not quorum size: a node whose
/// ZooKeeper answers `ls /` counts as ready even if peers are still
/// joining. The broker gate downstream fails anyway if the ensemble never
/// actually forms.
pub async fn ensemble_ready<A: NodeAgent + ?Sized>(agent: &A) -> Result<bool> {
    let command = format!("{} localhost:{} ls /", paths::ZOOKEEPER_SHELL, ports::CLIENT);
    let out = agent.execute(&command).await?;
    Ok(out.success())
}

/// True once exactly `expected` brokers are registered in the coordination
/// namespace, observed from a single designated node.
pub async fn brokers_registered<A: NodeAgent + ?Sized>(
    agent: &A,
    expected: usize,
) -> Result<bool> {
    let command = format!(
        "{} localhost:{} <<< \"ls {}\" | tail -n 1",
        paths::ZOOKEEPER_SHELL,
        ports::CLIENT,
        BROKER_IDS_PATH
    );
    let out = agent.execute(&command).await?;
    if !out.success() {
        return Ok(false);
    }

    let last_line = out.output.lines().last().unwrap_or("");
    Ok(parse_registered_brokers(last_line) == Some(expected))
}

/// Parse the broker-id listing returned by the shell.
///
/// During startup the shell emits non-JSON banners, partial output, or
/// nothing at all; anything that is not a JSON array literal is treated as
/// "not yet", never an error.
pub fn parse_registered_brokers(line: &str) -> Option<usize> {
    let line = line.trim();
    if !line.starts_with('[') {
        return None;
    }
    let ids: Vec<serde_json::Value> = serde_json::from_str(line).ok()?;
    Some(ids.len())
}
