//! Dataset upload, information, and removal handlers.
//!
//! An upload is one delimited text file with a header row. The parsed
//! dataset is stored session-scoped under a fresh id; everything else
//! the service does references that id.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use dashboard_core::{column_descriptions, Dataset, Error};
use std::time::Instant;
use telemetry::metrics;
use tracing::{info, warn};
use uuid::Uuid;

use crate::response::{ApiError, DatasetInfoResponse, UploadResponse};
use crate::state::AppState;

/// POST /datasets - parse and store an uploaded CSV.
///
/// Rejects oversized payloads before parsing and files with zero data
/// rows. Individual bad cells are tolerated and reported in the
/// response.
pub async fn upload_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<UploadResponse>, ApiError> {
    let start = Instant::now();

    if body.len() > state.max_upload_bytes {
        metrics().datasets_rejected.inc();
        return Err(Error::UploadTooLarge {
            size: body.len(),
            limit: state.max_upload_bytes,
        }
        .into());
    }

    let dataset = Dataset::from_csv(&body).map_err(|e| {
        metrics().datasets_rejected.inc();
        warn!(error = %e, "Upload rejected: unreadable CSV");
        ApiError::from(e)
    })?;

    if dataset.is_empty() {
        metrics().datasets_rejected.inc();
        warn!("Upload rejected: no data rows");
        return Err(Error::EmptyInput.into());
    }

    let rows = dataset.len();
    let fraud_rows = dataset.fraud_rows();
    let columns = dataset.columns().to_vec();
    let skipped_cells = dataset.skipped_cells();

    metrics().datasets_loaded.inc();
    metrics().rows_parsed.inc_by(rows as u64);
    metrics().cells_skipped.inc_by(skipped_cells);

    let dataset_id = state.datasets.insert(dataset).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    metrics().parse_latency_ms.observe(latency_ms);

    info!(
        dataset_id = %dataset_id,
        rows = rows,
        fraud_rows = fraud_rows,
        skipped_cells = skipped_cells,
        latency_ms = latency_ms,
        "Dataset loaded"
    );

    Ok(Json(UploadResponse {
        dataset_id,
        rows,
        fraud_rows,
        columns,
        skipped_cells,
    }))
}

/// GET /datasets/{id} - dataset information: counts, preview, and the
/// column glossary.
pub async fn info_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DatasetInfoResponse>, ApiError> {
    let dataset = state
        .datasets
        .get(id)
        .await
        .ok_or_else(|| ApiError::dataset_not_found(id))?;

    Ok(Json(DatasetInfoResponse {
        dataset_id: id,
        rows: dataset.len(),
        fraud_rows: dataset.fraud_rows(),
        columns: dataset.columns().to_vec(),
        skipped_cells: dataset.skipped_cells(),
        preview: dataset.preview().to_vec(),
        column_descriptions: column_descriptions(),
    }))
}

/// DELETE /datasets/{id} - drop a session's dataset.
pub async fn delete_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    state.datasets.remove(id).await;
    StatusCode::NO_CONTENT
}
