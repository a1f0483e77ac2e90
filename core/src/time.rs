//! Time related utils.

use chrono::Utc;

/// DateTime is the alias of `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Seconds since unix epoch, rendered the way the server expects it.
pub fn format_unix_timestamp(t: DateTime) -> String {
    t.timestamp().to_string()
}
