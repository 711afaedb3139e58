//! Remote node agent contract for caravel.
//!
//! The bootstrap orchestrator drives every node through this trait: run a
//! command and read its exit status, fire off a detached process, push or
//! fetch a file. Node provisioning (creating containers, networks, pulling
//! images) is out of scope — an agent assumes its node already exists.

pub mod docker;

pub use docker::DockerAgent;

use async_trait::async_trait;
use thiserror::Error;

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Debug, Error)]
pub enum AgentError {
    /// The command could not be dispatched at all (node unreachable,
    /// transport binary missing). Distinct from a remote command that ran
    /// and failed, which is reported as a non-zero exit code.
    #[error("transport error: {0}")]
    Transport(String),

    /// A file push or fetch failed on the remote side.
    #[error("file transfer failed: {0}")]
    FileTransfer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a completed remote command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    /// Combined stdout/stderr of the remote command.
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes commands and transfers files on a single cluster node.
#[async_trait]
pub trait NodeAgent: Send + Sync {
    /// Run `command` on the node and wait for it to finish.
    ///
    /// A command that runs and fails is `Ok` with a non-zero exit code;
    /// `Err` means the dispatch itself failed.
    async fn execute(&self, command: &str) -> Result<CommandOutput>;

    /// Dispatch `command` without waiting for the remote process.
    ///
    /// Success means the command was issued, not that the process is
    /// healthy — readiness is established separately by polling.
    async fn execute_detached(&self, command: &str) -> Result<()>;

    /// Write `content` to `path` on the node, replacing any existing file.
    async fn put_file(&self, path: &str, content: &str) -> Result<()>;

    /// Read the contents of `path` from the node.
    async fn get_file(&self, path: &str) -> Result<String>;
}
