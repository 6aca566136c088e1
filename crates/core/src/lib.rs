//! Core types, CSV parsing, and the aggregation pipeline for the fraud dashboard.

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod limits;
pub mod record;

pub use aggregate::*;
pub use dataset::*;
pub use error::{Error, Result};
pub use record::*;
