//! Device and snapshot types
//!
//! The vendor tool owns the schema of every payload, so these are open-ended
//! JSON mappings rather than fixed structs.

use serde_json::{Map, Value};

/// One entry of the discovered device list
pub type Device = Map<String, Value>;

/// Point-in-time JSON object returned by a per-device query.
///
/// The empty map means "no data".
pub type Snapshot = Map<String, Value>;

pub type StatsSnapshot = Snapshot;
pub type HealthSnapshot = Snapshot;
pub type ProcessSnapshot = Snapshot;

/// Queries supported against the vendor diagnostics tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Enumerate devices
    Discovery,
    /// Real-time statistics for one device
    Stats,
    /// Health status for one device
    Health,
    /// Processes running on one device
    Processes,
}

impl QueryKind {
    /// Vendor CLI subcommand for this query
    pub fn subcommand(&self) -> &'static str {
        match self {
            QueryKind::Discovery => "discovery",
            QueryKind::Stats => "stats",
            QueryKind::Health => "health",
            QueryKind::Processes => "ps",
        }
    }

    /// Whether the query targets a single device (`-d <id>`)
    pub fn is_per_device(&self) -> bool {
        !matches!(self, QueryKind::Discovery)
    }

    /// Human-readable label, used in log lines and error messages
    pub fn label(&self) -> &'static str {
        match self {
            QueryKind::Discovery => "device list",
            QueryKind::Stats => "stats",
            QueryKind::Health => "health info",
            QueryKind::Processes => "process info",
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.subcommand())
    }
}
