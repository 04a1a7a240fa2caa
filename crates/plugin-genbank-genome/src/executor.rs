//! Child process execution for the external converter.
//!
//! The tool is spawned directly (no shell), inherits the environment and
//! stdio of this process, and is awaited until it exits.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ConversionError;
use crate::invocation::Invocation;

/// How the tool process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Wall time between spawn and exit.
    pub duration_ms: u64,
}

impl ExitOutcome {
    /// Zero exit status.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Launches an invocation and waits for it to finish.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Run `invocation` to completion.
    async fn launch(&self, invocation: &Invocation) -> Result<ExitOutcome, ConversionError>;
}

/// Launcher backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    /// Create an executor that waits indefinitely.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Kill the tool once `timeout_seconds` have elapsed.
    pub fn with_timeout(timeout_seconds: Option<u64>) -> Self {
        Self {
            timeout: timeout_seconds.map(Duration::from_secs),
        }
    }
}

#[async_trait]
impl ProcessLauncher for ProcessExecutor {
    async fn launch(&self, invocation: &Invocation) -> Result<ExitOutcome, ConversionError> {
        tracing::info!("Executing conversion tool: {}", invocation.command_line());
        let start = Instant::now();

        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConversionError::ToolNotFound {
                    program: invocation.program().to_string(),
                }
            } else {
                ConversionError::Io(e)
            }
        })?;

        tracing::debug!(pid = ?child.id(), "Conversion tool started");

        let status = match self.timeout {
            None => child.wait().await?,
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status?,
                Err(_) => {
                    tracing::error!(
                        "Conversion tool timed out after {}s, killing it",
                        limit.as_secs()
                    );
                    child.kill().await?;
                    return Err(ConversionError::ToolTimeout {
                        input_directory: input_directory_of(invocation),
                        timeout_seconds: limit.as_secs(),
                    });
                }
            },
        };

        Ok(ExitOutcome {
            code: status.code(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

fn input_directory_of(invocation: &Invocation) -> String {
    invocation
        .tool_args()
        .iter()
        .find(|a| a.flag == crate::invocation::INPUT_DIRECTORY_FLAG)
        .map(|a| a.value.clone())
        .unwrap_or_default()
}
