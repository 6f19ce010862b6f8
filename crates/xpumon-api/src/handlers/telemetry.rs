//! Per-device telemetry handlers (stats, health, processes)
//!
//! Snapshots are returned exactly as the vendor tool produced them.

use axum::extract::{Path, State};
use axum::Json;
use xpumon_core::{QueryKind, Snapshot};

use crate::error::ApiError;
use crate::state::AppState;

fn non_empty(
    kind: QueryKind,
    device_id: &str,
    snapshot: Snapshot,
) -> Result<Json<Snapshot>, ApiError> {
    if snapshot.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Device {} {} not available",
            device_id,
            kind.label()
        )));
    }
    Ok(Json(snapshot))
}

/// GET /stats/{device_id}
/// Real-time statistics for a device
pub async fn device_stats(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    let stats = state.backend().get_stats(&device_id).await;
    non_empty(QueryKind::Stats, &device_id, stats)
}

/// GET /health/{device_id}
/// Health status for a device
pub async fn device_health(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    let health = state.backend().get_health(&device_id).await;
    non_empty(QueryKind::Health, &device_id, health)
}

/// GET /processes/{device_id}
/// Processes running on a device
pub async fn device_processes(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    let processes = state.backend().get_processes(&device_id).await;
    non_empty(QueryKind::Processes, &device_id, processes)
}
