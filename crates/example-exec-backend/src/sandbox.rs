//! Python snippet execution with a wall-clock limit

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Maximum wall-clock time a snippet may run
pub const EXECUTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of running a snippet
#[derive(Debug)]
pub struct ExecutionResult {
    pub success: bool,
    pub output: String,
    pub error: String,
}

/// Errors the caller maps to HTTP status codes
#[derive(Debug)]
pub enum SandboxError {
    /// The snippet exceeded [`EXECUTION_TIMEOUT`]
    TimedOut,
    /// The interpreter could not be started
    Internal(anyhow::Error),
}

/// Write `code` to a scratch file and run it with python3.
///
/// Non-zero exit is reported in the result, not as an error; only a
/// timeout or a failure to launch the interpreter is escalated.
pub async fn run_python(code: &str) -> std::result::Result<ExecutionResult, SandboxError> {
    let dir = tempfile::tempdir()
        .context("Failed to create scratch directory")
        .map_err(SandboxError::Internal)?;
    let script = dir.path().join("snippet.py");
    tokio::fs::write(&script, code)
        .await
        .context("Failed to write snippet")
        .map_err(SandboxError::Internal)?;

    let child = tokio::process::Command::new("python3")
        .arg(&script)
        .current_dir(dir.path())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(EXECUTION_TIMEOUT, child).await {
        Ok(result) => result
            .context("Failed to launch python3")
            .map_err(SandboxError::Internal)?,
        Err(_) => {
            warn!(timeout_secs = EXECUTION_TIMEOUT.as_secs(), "Snippet timed out");
            return Err(SandboxError::TimedOut);
        }
    };

    let result = ExecutionResult {
        success: output.status.success(),
        output: String::from_utf8_lossy(&output.stdout).into_owned(),
        error: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    info!(success = result.success, "Snippet finished");
    Ok(result)
}
