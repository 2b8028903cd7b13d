//! Date normalization into the catalog's ISO-8601 form.
//!
//! Source files carry dates in whatever shape their producers chose. Every
//! temporal extent in a record goes through [`parse_datetime`] and is
//! rendered by [`to_iso`], so bounds from different formats compare cleanly.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

/// Output format for whole-second timestamps.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Time value out of range: {0}")]
    OutOfRange(String),
}

/// Parse a free-form or structured date representation.
///
/// Offsets are folded into UTC; naive inputs are taken as UTC already.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, TimeParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::InvalidFormat(s.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    let naive = strip_utc_suffix(trimmed);

    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Ok(ndt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive, fmt) {
            return midnight(date, s);
        }
    }

    parse_compact(naive).ok_or_else(|| TimeParseError::InvalidFormat(s.to_string()))
}

/// Normalize a date string to `YYYY-MM-DDTHH:MM:SS`.
pub fn date_to_iso(s: &str) -> Result<String, TimeParseError> {
    parse_datetime(s).map(|dt| to_iso(&dt))
}

/// Render a timestamp; sub-second precision is only shown when present.
pub fn to_iso(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format(ISO_FORMAT).to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn strip_utc_suffix(s: &str) -> &str {
    ["Z", " UTC", " GMT", "UTC"]
        .iter()
        .find_map(|suffix| s.strip_suffix(suffix))
        .map(str::trim_end)
        .unwrap_or(s)
}

fn midnight(date: NaiveDate, original: &str) -> Result<NaiveDateTime, TimeParseError> {
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| TimeParseError::OutOfRange(original.to_string()))
}

/// Digit-only and truncated forms: `YYYY`, `YYYY-MM`, `YYYYMMDD`, `YYYYMMDDHHMMSS`.
fn parse_compact(s: &str) -> Option<NaiveDateTime> {
    let field = |range: std::ops::Range<usize>| s.get(range)?.parse::<u32>().ok();
    let all_digits = s.bytes().all(|b| b.is_ascii_digit());

    match s.len() {
        4 if all_digits => NaiveDate::from_ymd_opt(field(0..4)? as i32, 1, 1)?.and_hms_opt(0, 0, 0),
        7 if s.as_bytes()[4] == b'-' => {
            NaiveDate::from_ymd_opt(field(0..4)? as i32, field(5..7)?, 1)?.and_hms_opt(0, 0, 0)
        }
        8 if all_digits => {
            NaiveDate::from_ymd_opt(field(0..4)? as i32, field(4..6)?, field(6..8)?)?
                .and_hms_opt(0, 0, 0)
        }
        14 if all_digits => NaiveDate::from_ymd_opt(field(0..4)? as i32, field(4..6)?, field(6..8)?)?
            .and_hms_opt(field(8..10)?, field(10..12)?, field(12..14)?),
        _ => None,
    }
}
