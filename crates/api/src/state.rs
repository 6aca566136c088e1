//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use dashboard_core::limits::{DATASET_TTL_SECS, MAX_ACTIVE_DATASETS, MAX_UPLOAD_BYTES};
use dashboard_core::Dataset;
use moka::future::Cache;
use telemetry::metrics;
use tracing::debug;
use uuid::Uuid;

/// Session-scoped dataset store.
///
/// Each upload gets a fresh id; entries expire after the TTL and are
/// never shared between sessions. A stored dataset is immutable, so
/// handlers can aggregate over the same `Arc` concurrently.
#[derive(Clone)]
pub struct DatasetStore {
    cache: Cache<Uuid, Arc<Dataset>>,
}

impl DatasetStore {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Store a dataset under a new id.
    pub async fn insert(&self, dataset: Dataset) -> Uuid {
        let id = Uuid::new_v4();
        self.cache.insert(id, Arc::new(dataset)).await;
        metrics().active_datasets.set(self.cache.entry_count());
        debug!(dataset_id = %id, "Dataset stored");
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Dataset>> {
        self.cache.get(&id).await
    }

    pub async fn remove(&self, id: Uuid) {
        self.cache.invalidate(&id).await;
        metrics().active_datasets.set(self.cache.entry_count());
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Uploaded datasets, session-scoped.
    pub datasets: DatasetStore,
    /// Upload size cap, enforced before parsing.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_limits(
            MAX_UPLOAD_BYTES,
            Duration::from_secs(DATASET_TTL_SECS),
            MAX_ACTIVE_DATASETS,
        )
    }

    /// Create with custom limits (configurable from the binary).
    pub fn with_limits(max_upload_bytes: usize, dataset_ttl: Duration, max_datasets: u64) -> Self {
        Self {
            datasets: DatasetStore::new(dataset_ttl, max_datasets),
            max_upload_bytes,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
