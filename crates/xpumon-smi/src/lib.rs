//! xpumon-smi - Vendor diagnostics CLI bridge
//!
//! This crate turns the vendor's command-line tools into a [`DeviceBackend`]:
//!
//! - [`QueryRunner`] invokes candidate binaries (`xpumcli`, then `xpu-smi`)
//!   with a bounded timeout and falls back when one is missing or failing
//! - [`XpuSmiBackend`] parses the JSON output and collapses every failure
//!   into the empty "no data" value
//!
//! # Example
//!
//! ```ignore
//! use xpumon_smi::{SmiConfig, XpuSmiBackend};
//!
//! let backend = XpuSmiBackend::from_config(&SmiConfig::default());
//! let devices = backend.list_devices().await;
//! ```

pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod mock;
pub mod parse;
pub mod runner;

pub use backend::XpuSmiBackend;
pub use command::CommandSpec;
pub use config::SmiConfig;
pub use error::{ConfigError, ExecError};
pub use executor::{CommandExecutor, ProcessOutput, SystemExecutor};
pub use runner::{Attempt, FailReason, QueryRunner, SkipReason};

// Re-export core types for convenience
pub use xpumon_core::{Device, DeviceBackend, QueryKind, Snapshot};
