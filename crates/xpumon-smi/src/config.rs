//! Runner configuration
//!
//! Deserialized from the `[smi]` section of the daemon config. Every field
//! has a default so an empty section (or no section) is valid.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Primary vendor tool
pub const PRIMARY_BINARY: &str = "xpumcli";

/// Legacy vendor tool, tried when the primary is missing or failing
pub const LEGACY_BINARY: &str = "xpu-smi";

/// Per-attempt timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SmiConfig {
    /// Candidate binaries in priority order
    pub binaries: Vec<String>,
    /// Timeout applied to each attempt (seconds)
    pub timeout_secs: u64,
}

impl Default for SmiConfig {
    fn default() -> Self {
        Self {
            binaries: vec![PRIMARY_BINARY.to_string(), LEGACY_BINARY.to_string()],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SmiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Upper bound on one query: every candidate timing out in turn.
    ///
    /// Saturates at `Duration::MAX`; `validate` rejects such configs.
    pub fn worst_case(&self) -> Duration {
        worst_case(self.timeout(), self.binaries.len()).unwrap_or(Duration::MAX)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.binaries.is_empty() {
            return Err(ConfigError::NoBinaries);
        }
        if let Some(pos) = self.binaries.iter().position(|b| b.trim().is_empty()) {
            return Err(ConfigError::EmptyBinary(pos));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if worst_case(self.timeout(), self.binaries.len()).is_none() {
            return Err(ConfigError::TimeoutOverflow {
                timeout_secs: self.timeout_secs,
                binaries: self.binaries.len(),
            });
        }
        Ok(())
    }
}

/// `timeout x candidates`, or `None` on overflow
pub(crate) fn worst_case(timeout: Duration, candidates: usize) -> Option<Duration> {
    u32::try_from(candidates)
        .ok()
        .and_then(|n| timeout.checked_mul(n))
}
