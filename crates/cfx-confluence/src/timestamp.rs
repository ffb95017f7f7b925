//! Watermark timestamps.
//!
//! Confluence Cloud reports times as `2021-06-01T12:00:00.000Z`; the stored
//! `last_run` watermark uses the same shape with exactly three fractional digits.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Watermark used when no previous run is recorded.
pub const DEFAULT_WATERMARK: &str = "2000-01-01T00:00:00.000Z";

const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parse a Confluence or watermark timestamp.
///
/// Accepts the `Z`-suffixed form first and falls back to RFC 3339 with an
/// explicit offset, which Confluence Server/Data Center returns.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match NaiveDateTime::parse_from_str(value, PARSE_FORMAT) {
        Ok(naive) => Ok(naive.and_utc()),
        Err(err) => DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| err),
    }
}

/// Format a timestamp with millisecond precision and a literal `Z`.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format(FORMAT).to_string()
}

/// The default watermark as a timestamp.
pub fn default_watermark() -> DateTime<Utc> {
    // 2000-01-01T00:00:00Z
    DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(10_957)
}
