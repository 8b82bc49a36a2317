//! Timestamp helpers for record capture times.

use chrono::{DateTime, Utc};

/// Represents a capture timestamp.
pub type Timestamp = DateTime<Utc>;

/// Returns the current UTC time as an ISO 8601 formatted string.
///
/// The format is `YYYY-MM-DDTHH:MM:SS.ffffff+00:00`, the form earlier
/// prospect exports already carry, so appended rows sort alongside them.
///
/// # Examples
///
/// ```
/// use prospectflow::utils::iso_timestamp;
///
/// let ts = iso_timestamp();
/// assert!(ts.contains('T'));
/// assert!(ts.ends_with("+00:00"));
/// ```
#[must_use]
pub fn iso_timestamp() -> String {
    iso_timestamp_of(now_utc())
}

/// Formats a timestamp as an ISO 8601 string with microseconds.
#[must_use]
pub fn iso_timestamp_of(dt: Timestamp) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}

/// Returns the current UTC timestamp.
#[must_use]
pub fn now_utc() -> Timestamp {
    Utc::now()
}
