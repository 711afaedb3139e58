//! Configuration text generation and patching.

use crate::constants::{paths, ports};
use crate::error::{BootstrapError, Result};
use crate::roster::NodeRoster;

/// ZooKeeper tuning parameters shared by every ensemble member.
const ENSEMBLE_TUNING: &[&str] = &[
    "tickTime=2000",
    "dataDir=/zookeeper",
    "clientPort=2181",
    "initLimit=5",
    "syncLimit=2",
];

/// Key whose value carries the broker identity in the vendor template.
const BROKER_ID_KEY: &str = "broker.id";

/// Render the shared ensemble configuration for a roster.
///
/// Pure and deterministic: fixed tuning lines first, then one membership
/// line per roster entry in roster order, each keyed by the entry's index
/// and hostname. Every node receives this same text; only the `myid`
/// marker differs per node.
pub fn build_ensemble_config(roster: &NodeRoster) -> String {
    let mut lines: Vec<String> = ENSEMBLE_TUNING.iter().map(|s| s.to_string()).collect();
    for node in roster {
        lines.push(format!(
            "server.{}={}:{}:{}",
            node.index,
            node.hostname,
            ports::PEER,
            ports::ELECTION
        ));
    }
    lines.join("\n")
}

/// Rewrite the `broker.id` value in a fetched broker template to `index`.
///
/// Operates line-by-line on the `key=value` structure, preserving every
/// other line (comments and blanks included) byte-for-byte, so the result
/// is idempotent under re-application with the same index. A template
/// without a `broker.id` assignment means the vendor layout changed;
/// that is a [`BootstrapError::ConfigShape`], never a silent no-op.
pub fn patch_broker_config(template: &str, index: u32) -> Result<String> {
    let mut patched = false;
    let lines: Vec<String> = template
        .lines()
        .map(|line| {
            if !patched && property_key(line) == Some(BROKER_ID_KEY) {
                patched = true;
                format!("{BROKER_ID_KEY}={index}")
            } else {
                line.to_string()
            }
        })
        .collect();

    if !patched {
        return Err(BootstrapError::ConfigShape(format!(
            "no `{BROKER_ID_KEY}` assignment in template {}",
            paths::BROKER_TEMPLATE
        )));
    }

    let mut out = lines.join("\n");
    if template.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Key of a `key=value` properties line, or `None` for comments/blanks.
fn property_key(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') || trimmed.starts_with('!') {
        return None;
    }
    trimmed.split_once('=').map(|(key, _)| key.trim())
}
