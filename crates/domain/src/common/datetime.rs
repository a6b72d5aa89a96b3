//! Timestamp parsing for the notes store.
//!
//! Notes written by this crate use RFC 3339. Older stores carry a plain
//! `YYYY-MM-DD HH:MM:SS[.ffffff]` local-style stamp, which is read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format of legacy note timestamps (no offset, optional fraction).
const LEGACY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parses an RFC 3339 or legacy timestamp string.
///
/// # Examples
///
/// ```
/// use charsheet_domain::common::parse_datetime;
/// use chrono::Datelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
///
/// let legacy = parse_datetime("2024-01-15 10:30:00.123456").unwrap();
/// assert_eq!(legacy.day(), 15);
/// ```
///
/// # Errors
///
/// Returns `chrono::ParseError` if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let s = s.trim();
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(s, LEGACY_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}
