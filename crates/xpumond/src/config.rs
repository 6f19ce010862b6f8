//! Daemon configuration
//!
//! Loaded from a TOML file. Every section is optional; command-line flags
//! are applied on top by `main`.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use xpumon_smi::SmiConfig;

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub server: ServerConfig,
    pub smi: SmiConfig,
    pub log: LogConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Overall deadline per HTTP request (seconds). Unset means no deadline.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            request_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Emit JSON log lines instead of the human-readable format
    pub json: bool,
}

impl DaemonConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check the runner settings and that the request deadline, if any,
    /// covers every candidate binary timing out in turn.
    pub fn validate(&self) -> Result<()> {
        self.smi.validate().context("Invalid [smi] section")?;

        if let Some(deadline) = self.server.request_timeout() {
            let worst_case = self.smi.worst_case();
            if deadline < worst_case {
                bail!(
                    "server.request_timeout_secs ({}s) is shorter than the worst-case query time \
                     ({}s = {} binaries x {}s)",
                    deadline.as_secs(),
                    worst_case.as_secs(),
                    self.smi.binaries.len(),
                    self.smi.timeout_secs
                );
            }
        }

        Ok(())
    }
}
