//! `docker exec` transport.
//!
//! Runs commands inside an already-running container whose name matches the
//! node's hostname. Files are piped through stdin/stdout of `docker exec`
//! so no volume mounts or `docker cp` staging paths are needed.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::{AgentError, CommandOutput, NodeAgent, Result};

/// Agent for a single Docker container.
pub struct DockerAgent {
    container: String,
}

impl DockerAgent {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    fn transport_err(&self, context: &str, err: impl std::fmt::Display) -> AgentError {
        AgentError::Transport(format!("{context} on {}: {err}", self.container))
    }
}

#[async_trait]
impl NodeAgent for DockerAgent {
    async fn execute(&self, command: &str) -> Result<CommandOutput> {
        debug!(container = %self.container, command, "execute");
        let out = Command::new("docker")
            .args(["exec", &self.container, "sh", "-c", command])
            .output()
            .await
            .map_err(|e| self.transport_err("docker exec", e))?;

        let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&out.stderr));

        Ok(CommandOutput {
            // Signal-terminated processes have no code; fold into a failure.
            exit_code: out.status.code().unwrap_or(-1),
            output,
        })
    }

    async fn execute_detached(&self, command: &str) -> Result<()> {
        debug!(container = %self.container, command, "execute detached");
        // `docker exec -d` returns once the daemon has started the process.
        let status = Command::new("docker")
            .args(["exec", "-d", &self.container, "sh", "-c", command])
            .status()
            .await
            .map_err(|e| self.transport_err("docker exec -d", e))?;

        if !status.success() {
            return Err(self.transport_err("docker exec -d", format!("exit {status}")));
        }
        Ok(())
    }

    async fn put_file(&self, path: &str, content: &str) -> Result<()> {
        debug!(container = %self.container, path, bytes = content.len(), "put file");
        let mut child = Command::new("docker")
            .args([
                "exec",
                "-i",
                &self.container,
                "sh",
                "-c",
                &format!("cat > {path}"),
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.transport_err("docker exec -i", e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.transport_err("docker exec -i", "stdin not captured"))?;
        stdin.write_all(content.as_bytes()).await?;
        drop(stdin);

        let status = child
            .wait()
            .await
            .map_err(|e| self.transport_err("docker exec -i", e))?;
        if !status.success() {
            return Err(AgentError::FileTransfer(format!(
                "writing {path} on {}: exit {status}",
                self.container
            )));
        }
        Ok(())
    }

    async fn get_file(&self, path: &str) -> Result<String> {
        debug!(container = %self.container, path, "get file");
        let out = Command::new("docker")
            .args(["exec", &self.container, "cat", path])
            .output()
            .await
            .map_err(|e| self.transport_err("docker exec", e))?;

        if !out.status.success() {
            return Err(AgentError::FileTransfer(format!(
                "reading {path} on {}: {}",
                self.container,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}
