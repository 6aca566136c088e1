//! Unified error types for the dashboard backend.
//!
//! The aggregation pipeline distinguishes three failure classes:
//! - `MissingColumn`: the uploaded file lacks a column the requested
//!   aggregation needs. Fatal to that aggregation only.
//! - `EmptyInput`: the dataset has zero rows. Callers treat this as
//!   "nothing to aggregate", not a hard failure.
//! - Unparsable cells never surface as errors here; the offending rows
//!   are excluded from the affected aggregate and counted.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the dashboard backend.
#[derive(Debug, Error)]
pub enum Error {
    /// A column required by the requested aggregation is absent.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// The dataset contains no data rows.
    #[error("dataset has no rows")]
    EmptyInput,

    /// The uploaded payload exceeds the configured size limit.
    #[error("upload of {size} bytes exceeds the {limit} byte limit")]
    UploadTooLarge { size: usize, limit: usize },

    /// The requested aggregation dimension does not exist.
    #[error("unknown aggregation dimension: {0}")]
    UnknownDimension(String),

    /// The CSV reader rejected the file outright (structural problems,
    /// not individual cell values).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }

    pub fn unknown_dimension(name: impl Into<String>) -> Self {
        Self::UnknownDimension(name.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingColumn(_) => 422,
            Self::EmptyInput => 422,
            Self::UploadTooLarge { .. } => 413,
            Self::UnknownDimension(_) => 404,
            Self::Csv(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}
