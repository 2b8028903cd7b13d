//! Conversion of numeric time axes into timestamps.
//!
//! Time coordinates are stored as offsets from a reference instant, with
//! the unit and reference declared in a `units` attribute such as
//! `hours since 1970-01-01 00:00:00`.

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use catalog_common::{parse_datetime, TemporalExtent};

use crate::error::{ExtractionError, Result};

const FORMAT: &str = "time axis";

/// Largest offset accepted, in microseconds (about 31 000 years).
const MAX_OFFSET_MICROS: f64 = 1.0e18;

/// Calendars whose dates map one-to-one onto the proleptic Gregorian calendar.
const SUPPORTED_CALENDARS: [&str; 3] = ["standard", "gregorian", "proleptic_gregorian"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl TimeUnit {
    fn parse(s: &str) -> Option<Self> {
        let unit = match s.to_lowercase().as_str() {
            "seconds" | "second" | "secs" | "sec" | "s" => TimeUnit::Seconds,
            "minutes" | "minute" | "mins" | "min" => TimeUnit::Minutes,
            "hours" | "hour" | "hrs" | "hr" | "h" => TimeUnit::Hours,
            "days" | "day" | "d" => TimeUnit::Days,
            "weeks" | "week" => TimeUnit::Weeks,
            _ => return None,
        };
        Some(unit)
    }

    fn micros(self) -> f64 {
        let seconds = match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Days => 86_400.0,
            TimeUnit::Weeks => 604_800.0,
        };
        seconds * 1.0e6
    }
}

/// A parsed `<unit> since <reference>` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    pub unit: TimeUnit,
    pub reference: NaiveDateTime,
}

/// Parse a `units` attribute of the form `<unit> since <reference>`.
pub fn parse_time_units(units: &str) -> Result<TimeUnits> {
    let trimmed = units.trim();
    let (unit, reference) = trimmed
        .split_once(" since ")
        .ok_or_else(|| ExtractionError::parse(FORMAT, format!("not a time unit: {}", units)))?;

    let unit = TimeUnit::parse(unit.trim())
        .ok_or_else(|| ExtractionError::parse(FORMAT, format!("unknown time unit: {}", unit)))?;
    let reference = parse_datetime(reference)?;

    Ok(TimeUnits { unit, reference })
}

fn check_calendar(calendar: Option<&str>) -> Result<()> {
    match calendar {
        None => Ok(()),
        Some(c) if SUPPORTED_CALENDARS.contains(&c.trim().to_lowercase().as_str()) => Ok(()),
        Some(c) => Err(ExtractionError::parse(
            FORMAT,
            format!("unsupported calendar: {}", c),
        )),
    }
}

/// Convert one offset into a timestamp.
pub fn num2date(value: f64, units: &TimeUnits) -> Result<NaiveDateTime> {
    let micros = value * units.unit.micros();
    if !micros.is_finite() || micros.abs() > MAX_OFFSET_MICROS {
        return Err(ExtractionError::parse(
            FORMAT,
            format!("offset out of range: {}", value),
        ));
    }

    units
        .reference
        .checked_add_signed(Duration::microseconds(micros.round() as i64))
        .ok_or_else(|| ExtractionError::parse(FORMAT, format!("offset out of range: {}", value)))
}

/// Temporal extent of a time axis: its first and last finite values.
///
/// An axis with no finite values has no extent.
pub fn time_extent(values: &[f64], units: &str, calendar: Option<&str>) -> Result<TemporalExtent> {
    check_calendar(calendar)?;
    let units = parse_time_units(units)?;

    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let first = finite
        .next()
        .ok_or_else(|| ExtractionError::AttributeMissing("time values".to_string()))?;
    let last = finite.last().unwrap_or(first);

    let (start, end) = (num2date(first, &units)?, num2date(last, &units)?);
    debug!(start = %start, end = %end, count = values.len(), "Converted time axis");
    Ok(TemporalExtent::spanning(start, end))
}
