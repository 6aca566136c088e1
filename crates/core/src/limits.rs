//! Size limits and fixed constants for the dashboard backend.

/// Maximum upload payload size in bytes (50MB).
///
/// The full reference dataset is ~350MB; typical analysis samples are
/// well under this. Enforced before parsing to bound the working set.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Number of raw rows captured for the dataset preview.
pub const PREVIEW_ROWS: usize = 5;

/// Length of the dense hour-of-day series (hours 0..23).
pub const HOURS_PER_DAY: usize = 24;

/// Number of entries in the day-of-week series (Monday..Sunday).
pub const DAYS_PER_WEEK: usize = 7;

/// Default time-to-live for an uploaded dataset, in seconds (1 hour).
///
/// Datasets are session-scoped: an expired id means the client uploads
/// again. Nothing is persisted.
pub const DATASET_TTL_SECS: u64 = 3600;

/// Maximum number of datasets held in memory at once.
pub const MAX_ACTIVE_DATASETS: u64 = 64;
