//! Timestamp utilities

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Storage format for TIMESTAMP columns
pub const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get current UTC timestamp, truncated to whole seconds (the stored precision)
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

/// Format a timestamp for storage
pub fn to_db_string(ts: &DateTime<Utc>) -> String {
    ts.format(DB_TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp
pub fn from_db_string(s: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, DB_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::InvalidInput(format!("invalid timestamp '{}': {}", s, e)))
}
