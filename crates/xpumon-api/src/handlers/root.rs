//! Service banner

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub version: &'static str,
}

/// GET /
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Intel XPU Web Monitor",
        version: env!("CARGO_PKG_VERSION"),
    })
}
