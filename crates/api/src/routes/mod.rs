//! API routes.

pub mod aggregates;
pub mod datasets;
pub mod health;
pub mod sections;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/datasets", post(datasets::upload_handler))
        .route(
            "/datasets/:id",
            get(datasets::info_handler).delete(datasets::delete_handler),
        )
        .route(
            "/datasets/:id/aggregates/:dimension",
            get(aggregates::aggregate_handler),
        )
        .route("/sections", get(sections::sections_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
