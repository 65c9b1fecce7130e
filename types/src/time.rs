use chrono::{DateTime, Utc};

/// Absolute UTC instant
pub type UtcTimestamp = DateTime<Utc>;
