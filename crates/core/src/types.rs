/// Primary keys are MySQL `BIGINT UNSIGNED AUTO_INCREMENT`.
pub type DbId = u64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
