//! Staged bootstrap engine for a Confluent Kafka topology.
//!
//! Brings a ZooKeeper ensemble, Kafka brokers, and Schema Registry online
//! across a fixed roster of nodes, in dependency order, gating each stage
//! transition on an explicit readiness poll:
//!
//! 1. Start the ZooKeeper ensemble on every node.
//! 2. Gate: every node's ZooKeeper answers the shell protocol.
//! 3. Start every Kafka broker with its roster-derived `broker.id`.
//! 4. Gate: all brokers appear under `/brokers/ids` on the first node.
//! 5. Start Schema Registry everywhere; no gate follows.
//!
//! All remote interaction goes through the [`caravel_agent::NodeAgent`]
//! contract; progress is reported through an injected
//! [`observer::BootstrapObserver`] rather than a process-global logger.

pub mod config;
pub mod constants;
pub mod error;
pub mod observer;
pub mod orchestrator;
pub mod poll;
pub mod readiness;
pub mod roster;

pub use error::{BootstrapError, Result};
pub use observer::{BootstrapObserver, NullObserver, TracingObserver};
pub use orchestrator::{BootstrapOrchestrator, GateSettings, Stage};
pub use roster::{Node, NodeRoster};
