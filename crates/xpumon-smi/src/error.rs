//! Error types for CLI execution and configuration

use std::time::Duration;

use thiserror::Error;

/// Failure to run a candidate binary to completion.
///
/// A process that runs and exits non-zero is not an `ExecError`; the runner
/// classifies that case from [`crate::ProcessOutput`].
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Binary not found: {0}")]
    NotFound(String),

    #[error("Failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for {binary}: {source}")]
    Wait {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} timed out after {timeout:?}")]
    TimedOut { binary: String, timeout: Duration },
}

impl ExecError {
    /// Whether the binary is simply absent from the execution path
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExecError::NotFound(_))
    }
}

/// Invalid runner configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least one candidate binary must be configured")]
    NoBinaries,

    #[error("Empty binary name at position {0}")]
    EmptyBinary(usize),

    #[error("Command timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Worst-case query time overflows ({binaries} binaries x {timeout_secs}s)")]
    TimeoutOverflow { timeout_secs: u64, binaries: usize },
}
