//! Internal telemetry for the fraud dashboard.
//!
//! In-memory counters and health state only; there is no external
//! metrics backend. Everything is exposed through the health routes.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
