/// All database primary keys are PostgreSQL BIGSERIAL.
///
/// Negative values never come from the database: they are client-assigned
/// placeholders for records that have not been persisted yet.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
