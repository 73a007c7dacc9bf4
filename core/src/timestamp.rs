//! Naive ISO-8601 timestamps.
//!
//! Timestamps carry no timezone. The server clock is read as UTC and stored
//! naive, truncated to microseconds so values survive a JSON round-trip
//! unchanged.

use chrono::{NaiveDate, NaiveDateTime, SubsecRound, Utc};

use crate::error::TodoError;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Current UTC wall-clock time without timezone, at microsecond precision.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// Parse a timestamp sent by a client.
///
/// Accepts a full date-time with `T` or space separator (seconds and fraction
/// optional) or a bare date, which is taken as midnight.
pub fn parse_iso8601(field: &str, raw: &str) -> Result<NaiveDateTime, TodoError> {
    let raw = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            TodoError::validation(format!(
                "Invalid ISO-8601 timestamp for field {field}: {raw}"
            ))
        })
}
