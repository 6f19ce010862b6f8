//! DeviceBackend trait - the core abstraction between the HTTP layer and device data

use async_trait::async_trait;

use crate::models::{Device, HealthSnapshot, ProcessSnapshot, StatsSnapshot};

/// Source of device inventory and per-device telemetry.
///
/// Implementations never fail: every failure mode collapses to the empty
/// value (empty list, empty map). Callers decide what "no data" means for
/// their own surface.
#[async_trait]
pub trait DeviceBackend: Send + Sync {
    /// List all discovered devices
    async fn list_devices(&self) -> Vec<Device>;

    /// Real-time statistics for a device
    async fn get_stats(&self, device_id: &str) -> StatsSnapshot;

    /// Health status for a device
    async fn get_health(&self, device_id: &str) -> HealthSnapshot;

    /// Processes using a device
    async fn get_processes(&self, device_id: &str) -> ProcessSnapshot;
}
