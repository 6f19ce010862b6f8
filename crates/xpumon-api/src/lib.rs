//! xpumon-api - HTTP API layer for the XPU telemetry gateway
//!
//! This crate serves device inventory and per-device telemetry over HTTP
//! using the DeviceBackend trait. It is backend-agnostic: empty results from
//! the backend become error responses, everything else passes through.
//!
//! # Usage
//!
//! ```ignore
//! use xpumon_api::{create_router, AppState};
//! use xpumon_smi::{SmiConfig, XpuSmiBackend};
//!
//! let backend = XpuSmiBackend::from_config(&SmiConfig::default());
//! let state = AppState::new(Arc::new(backend));
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Create the REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(handlers::root::index))
        .route("/devices", get(handlers::devices::list_devices))
        .route("/stats/{device_id}", get(handlers::telemetry::device_stats))
        .route("/health/{device_id}", get(handlers::telemetry::device_health))
        .route(
            "/processes/{device_id}",
            get(handlers::telemetry::device_processes),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    if let Some(timeout) = state.request_timeout() {
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));
    }

    router.with_state(state)
}
