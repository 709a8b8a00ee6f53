/// Primary-key type shared by every table (`BIGSERIAL` on the Postgres side).
pub type DbId = i64;

/// Timestamps are stored and exchanged as UTC throughout.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
