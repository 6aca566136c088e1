//! Common test setup functions.

use api::{router, AppState};
use axum::Router;
use std::time::Duration;

/// Test context running the real router over a fresh state.
///
/// Every context gets its own dataset store, so tests never see each
/// other's uploads.
pub struct TestContext {
    pub router: Router,
}

impl TestContext {
    /// Create a new test context with default limits.
    pub fn new() -> Self {
        // The binary marks the store healthy at startup; tests exercise
        // the same readiness path.
        telemetry::health().dataset_store.set_healthy();
        let state = AppState::new();
        Self {
            router: router(state),
        }
    }

    /// Create a context with a small upload cap, for size-limit tests.
    pub fn with_upload_limit(max_upload_bytes: usize) -> Self {
        let state = AppState::with_limits(max_upload_bytes, Duration::from_secs(3600), 16);
        Self {
            router: router(state),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
