//! Timestamp parsing for task deadlines and AI reminder times
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Minute-precision format used by the task form and by AI reminder strings
pub const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse a timestamp the way the task client writes them.
///
/// Accepts RFC 3339 with an offset, `YYYY-MM-DDTHH:MM[:SS[.fff]]` in the local
/// zone, or a bare `YYYY-MM-DD` which is read as local midnight.
/// Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", MINUTE_FORMAT] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return local_to_utc(naive);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(local_to_utc)
}

/// Interpret a wall-clock time in the local zone.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times that
/// do not exist locally (DST spring-forward gap) yield `None`.
pub fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format an instant as local `YYYY-MM-DDTHH:MM`
pub fn format_local_minute(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(MINUTE_FORMAT).to_string()
}

/// Format an instant as a local `HH:MM:SS` clock time
pub fn format_local_clock(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}
