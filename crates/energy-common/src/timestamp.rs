//! Timestamp parsing and Datetime column construction.
//!
//! Simulation exports write timestamps as text (`2024-01-01 13:00:00`,
//! ISO `T` separator, optional fractional seconds, or date only). Star-schema
//! tables store them as microsecond-precision polars Datetime columns.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a textual timestamp, returning `None` when no supported layout matches.
///
/// # Examples
///
/// ```
/// use energy_common::parse_timestamp;
///
/// assert!(parse_timestamp("2024-01-01 13:00:00").is_some());
/// assert!(parse_timestamp("2024-01-01T13:00").is_some());
/// assert!(parse_timestamp("2024-01-01").is_some());
/// assert!(parse_timestamp("01/01/2024").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Build a microsecond Datetime column from naive timestamps.
pub fn datetime_column(name: &str, values: &[NaiveDateTime]) -> PolarsResult<Column> {
    let micros: Vec<i64> = values
        .iter()
        .map(|ts| ts.and_utc().timestamp_micros())
        .collect();
    let series = Series::new(name.into(), micros)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;
    Ok(series.into())
}
