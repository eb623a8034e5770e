use crate::error::TimeParseError;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

/// Timezone every displayed timestamp is rendered in
pub const DISPLAY_TIMEZONE: Tz = chrono_tz::Europe::Berlin;

/// e.g. "Tue, 05 Mar 2024 14:23:01"
pub const DISPLAY_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

// The fractional part is mandatory in both formats; chrono's `%.f` alone would
// also accept a bare seconds field.
static UTC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,9}Z$").expect("valid regex")
});

static OFFSET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,9}[+-]\d{2}:?\d{2}$")
        .expect("valid regex")
});

/// Parse a delivery timestamp such as `2024-03-05T13:23:01.000000Z`.
///
/// The string is read as UTC and the resulting instant is expressed in
/// [`DISPLAY_TIMEZONE`].
pub fn parse_delivery_time(input: &str) -> Result<DateTime<Tz>, TimeParseError> {
    if !UTC_PATTERN.is_match(input) {
        return Err(TimeParseError::new(input));
    }

    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.fZ")
        .map_err(|_| TimeParseError::new(input))?;

    Ok(naive.and_utc().with_timezone(&DISPLAY_TIMEZONE))
}

/// Parse an alarm state-change timestamp carrying its own UTC offset,
/// such as `2024-03-05T13:23:01.123000+00:00`.
pub fn parse_state_change_time(input: &str) -> Result<DateTime<FixedOffset>, TimeParseError> {
    if !OFFSET_PATTERN.is_match(input) {
        return Err(TimeParseError::new(input));
    }

    // CloudWatch sends `+0000`, other producers `+00:00`
    let format = if input.as_bytes()[input.len() - 3] == b':' {
        "%Y-%m-%dT%H:%M:%S%.f%:z"
    } else {
        "%Y-%m-%dT%H:%M:%S%.f%z"
    };

    DateTime::parse_from_str(input, format).map_err(|_| TimeParseError::new(input))
}

/// Render an instant as Berlin wall-clock time.
pub fn format_display<T: TimeZone>(instant: &DateTime<T>) -> String {
    instant
        .with_timezone(&DISPLAY_TIMEZONE)
        .format(DISPLAY_FORMAT)
        .to_string()
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
