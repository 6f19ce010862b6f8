//! Application state for the API

use std::sync::Arc;
use std::time::Duration;

use xpumon_core::DeviceBackend;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn DeviceBackend>,
    /// Overall deadline per HTTP request, if any
    request_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(backend: Arc<dyn DeviceBackend>) -> Self {
        Self {
            backend,
            request_timeout: None,
        }
    }

    /// Set an overall request deadline.
    ///
    /// Should cover the backend's worst case (every candidate binary timing
    /// out), otherwise slow fallbacks surface as request timeouts.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn backend(&self) -> &Arc<dyn DeviceBackend> {
        &self.backend
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}
