/// Local-time rendering for API timestamps and rate-limit resets.
use chrono::{DateTime, Local, TimeZone};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render epoch seconds in the local time zone, or `None` if out of range.
#[must_use]
pub fn format_epoch(epoch: i64) -> Option<String> {
    Local
        .timestamp_opt(epoch, 0)
        .single()
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
}

/// Render an RFC 3339 timestamp in the local time zone.
///
/// Unparsable input is returned as-is; a missing value renders as `(unknown date)`.
#[must_use]
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "(unknown date)".to_owned();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
        Err(_) => raw.to_owned(),
    }
}
