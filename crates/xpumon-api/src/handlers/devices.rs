//! Device inventory handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use xpumon_core::Device;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

/// GET /devices
/// List all GPU devices
pub async fn list_devices(
    State(state): State<AppState>,
) -> Result<Json<DevicesResponse>, ApiError> {
    let devices = state.backend().list_devices().await;

    // An empty list means the vendor tool is missing or broken, not "no GPUs"
    if devices.is_empty() {
        return Err(ApiError::Internal(
            "No GPU devices found or xpu-smi error".to_string(),
        ));
    }

    Ok(Json(DevicesResponse { devices }))
}
