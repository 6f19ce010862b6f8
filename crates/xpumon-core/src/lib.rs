//! xpumon-core - Core traits and types for the XPU telemetry gateway
//!
//! This crate provides the abstraction the HTTP layer talks to. Backends
//! (the vendor CLI bridge, test doubles) implement [`DeviceBackend`] and the
//! API crate stays agnostic of how device data is obtained.

pub mod backend;
pub mod models;

pub use backend::DeviceBackend;
pub use models::{
    Device, HealthSnapshot, ProcessSnapshot, QueryKind, Snapshot, StatsSnapshot,
};
