//! Aggregation request handlers.
//!
//! Each request names a dimension and recomputes its summary table
//! from the stored record set; nothing is cached between requests. A
//! failure here is isolated to the requested dimension, the dataset
//! stays usable for the others.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use dashboard_core::{aggregate, empty_summary, Dimension, Error, SplitMode};
use serde::Deserialize;
use std::time::Instant;
use telemetry::metrics;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::response::{AggregateResponse, ApiError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AggregateQuery {
    /// Count-vs-ratio switch for the gender and age-group dimensions.
    #[serde(default)]
    pub mode: SplitMode,
}

/// GET /datasets/{id}/aggregates/{dimension} - one summary table.
pub async fn aggregate_handler(
    State(state): State<AppState>,
    Path((id, dimension)): Path<(Uuid, String)>,
    Query(query): Query<AggregateQuery>,
) -> Result<Json<AggregateResponse>, ApiError> {
    let start = Instant::now();
    let dimension = Dimension::parse(&dimension)?;

    let dataset = state
        .datasets
        .get(id)
        .await
        .ok_or_else(|| ApiError::dataset_not_found(id))?;

    debug!(
        dataset_id = %id,
        dimension = dimension.as_str(),
        rows = dataset.len(),
        "Computing aggregate"
    );

    let table = match aggregate(&dataset, dimension, query.mode) {
        Ok(table) => table,
        // Zero rows is "nothing to aggregate", not a failure: the
        // rendering layer shows an empty chart.
        Err(Error::EmptyInput) => empty_summary(dimension, query.mode),
        Err(e) => {
            metrics().aggregation_errors.inc();
            warn!(
                dataset_id = %id,
                dimension = dimension.as_str(),
                error = %e,
                "Aggregation failed"
            );
            return Err(e.into());
        }
    };

    let excluded = table.excluded_rows();
    let latency_ms = start.elapsed().as_millis() as u64;
    metrics().aggregations_served.inc();
    metrics().rows_excluded.inc_by(excluded);
    metrics().aggregate_latency_ms.observe(latency_ms);

    info!(
        dataset_id = %id,
        dimension = dimension.as_str(),
        excluded_rows = excluded,
        latency_ms = latency_ms,
        "Aggregate served"
    );

    Ok(Json(AggregateResponse {
        dataset_id: id,
        dimension: dimension.as_str(),
        chart: dimension.chart(query.mode),
        table,
    }))
}
