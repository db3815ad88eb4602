//! The single side effect of the CLI backend: running `op`.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

pub const DEFAULT_OP_BINARY: &str = "op";

/// Why an invocation failed, plus whatever the tool wrote to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFailure {
    pub reason: String,
    pub stderr: String,
}

/// Runs one `op` invocation and returns its stdout.
#[async_trait]
pub trait OpCli: Send + Sync {
    async fn run(&self, args: &[String]) -> Result<String, RunFailure>;
}

/// Spawns the real `op` binary as a subprocess.
///
/// The child is not killed if the calling future is dropped; a started
/// command always runs to completion.
#[derive(Debug, Clone)]
pub struct OpProcess {
    binary: PathBuf,
}

impl OpProcess {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for OpProcess {
    fn default() -> Self {
        Self::new(DEFAULT_OP_BINARY)
    }
}

#[async_trait]
impl OpCli for OpProcess {
    async fn run(&self, args: &[String]) -> Result<String, RunFailure> {
        debug!(binary = %self.binary.display(), ?args, "running op command");

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RunFailure {
                reason: format!("failed to spawn {}: {e}", self.binary.display()),
                stderr: String::new(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(RunFailure {
                reason: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| RunFailure {
            reason: format!("stdout is not UTF-8: {e}"),
            stderr,
        })?;

        trace!(stdout_len = stdout.len(), "op command finished");
        Ok(stdout)
    }
}
