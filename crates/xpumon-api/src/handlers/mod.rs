//! HTTP request handlers
//!
//! These handlers use the DeviceBackend trait and are backend-agnostic.

pub mod devices;
pub mod root;
pub mod telemetry;
