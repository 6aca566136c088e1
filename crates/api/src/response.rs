//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dashboard_core::{ChartKind, ColumnDescription, Summary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Success response for a dataset upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub dataset_id: Uuid,
    pub rows: usize,
    pub fraud_rows: usize,
    pub columns: Vec<String>,
    /// Cells that were present but failed to parse during the load.
    pub skipped_cells: u64,
}

/// Dataset-information view: counts, preview, and the column glossary.
#[derive(Debug, Serialize)]
pub struct DatasetInfoResponse {
    pub dataset_id: Uuid,
    pub rows: usize,
    pub fraud_rows: usize,
    pub columns: Vec<String>,
    pub skipped_cells: u64,
    pub preview: Vec<BTreeMap<String, String>>,
    pub column_descriptions: Vec<ColumnDescription>,
}

/// One summary table with its rendering hint.
#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub dataset_id: Uuid,
    pub dimension: &'static str,
    pub chart: ChartKind,
    pub table: Summary,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub dataset_store_healthy: bool,
    pub active_datasets: u64,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// API error type mapping core errors onto HTTP statuses.
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn with_code(status: StatusCode, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg, code),
        }
    }

    pub fn dataset_not_found(id: Uuid) -> Self {
        Self::with_code(
            StatusCode::NOT_FOUND,
            "dataset_not_found",
            format!("no dataset with id {} (it may have expired)", id),
        )
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::INTERNAL_SERVER_ERROR, "internal", msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<dashboard_core::Error> for ApiError {
    fn from(err: dashboard_core::Error) -> Self {
        use dashboard_core::Error;

        let code = match &err {
            Error::MissingColumn(_) => "missing_column",
            Error::EmptyInput => "empty_input",
            Error::UploadTooLarge { .. } => "upload_too_large",
            Error::UnknownDimension(_) => "unknown_dimension",
            Error::Csv(_) => "invalid_csv",
            Error::Internal(_) => "internal",
        };
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        ApiError::with_code(status, code, err.to_string())
    }
}
