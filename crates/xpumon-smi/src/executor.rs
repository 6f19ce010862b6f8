//! Process execution seam
//!
//! The runner never spawns processes directly; it goes through a
//! [`CommandExecutor`] so tests can script binary behaviour and count calls.

use std::io;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ExecError;

/// Captured result of a process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl From<std::process::Output> for ProcessOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs one binary with arguments under a time bound
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(
        &self,
        binary: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProcessOutput, ExecError>;
}

/// Executor backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

#[async_trait]
impl CommandExecutor for SystemExecutor {
    async fn execute(
        &self,
        binary: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProcessOutput, ExecError> {
        let child = Command::new(binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed-out child is killed when the wait future is dropped
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ExecError::NotFound(binary.to_string()));
            }
            Err(e) => {
                return Err(ExecError::Spawn {
                    binary: binary.to_string(),
                    source: e,
                });
            }
        };

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ProcessOutput::from(output)),
            Ok(Err(e)) => Err(ExecError::Wait {
                binary: binary.to_string(),
                source: e,
            }),
            Err(_) => Err(ExecError::TimedOut {
                binary: binary.to_string(),
                timeout,
            }),
        }
    }
}
