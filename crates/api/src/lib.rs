//! HTTP API layer for the fraud dashboard.

pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
