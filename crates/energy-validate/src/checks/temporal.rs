//! Temporal coverage: uniform `dim_time` spacing and full fact coverage.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime};
use energy_model::table::columns;
use energy_model::{StarSchema, TableName, ValidationOptions};

use crate::error::{Result, ValidateError};
use crate::util::{datetimes, ints};

pub(crate) fn check(schema: &StarSchema, options: &ValidationOptions) -> Result<Vec<String>> {
    let dim_time = schema
        .get(TableName::DimTime)
        .ok_or(ValidateError::MissingTimeDimension)?;
    let missing_column = |column| ValidateError::MissingTimeColumn {
        table: TableName::DimTime,
        column,
    };
    let timestamps = datetimes(dim_time, columns::TIMESTAMP)
        .ok_or_else(|| missing_column(columns::TIMESTAMP))?;
    let time_keys =
        ints(dim_time, columns::TIME_KEY).ok_or_else(|| missing_column(columns::TIME_KEY))?;

    let mut errors = Vec::new();

    // Spacing between consecutive timestamps
    match expected_interval(options) {
        Some(expected) => {
            let gaps = count_gaps(timestamps.into_iter().flatten().collect(), expected);
            if gaps > 0 {
                errors.push(format!(
                    "Time series has {gaps} gaps (expected {} intervals)",
                    options.interval_label()
                ));
            }
        }
        None => errors.push(format!(
            "Expected interval must be a positive number of minutes, got {}",
            options.expected_interval_minutes
        )),
    }

    // Every fact table must cover every time key
    let all_keys: BTreeSet<i64> = time_keys.into_iter().flatten().collect();
    for fact in TableName::FACTS {
        let Some(present) = schema.get(fact).and_then(|df| ints(df, columns::TIME_KEY)) else {
            continue;
        };
        let present: BTreeSet<i64> = present.into_iter().flatten().collect();
        let missing = all_keys.difference(&present).count();
        if missing > 0 {
            errors.push(format!("{fact}: missing data for {missing} time periods"));
        }
    }

    Ok(errors)
}

/// The configured spacing, when it is a representable positive duration.
fn expected_interval(options: &ValidationOptions) -> Option<Duration> {
    Duration::try_minutes(options.expected_interval_minutes)
        .filter(|interval| *interval > Duration::zero())
}

/// Consecutive sorted timestamps whose spacing differs from `expected`.
fn count_gaps(mut timestamps: Vec<NaiveDateTime>, expected: Duration) -> usize {
    timestamps.sort_unstable();
    timestamps
        .windows(2)
        .filter(|pair| pair[1] - pair[0] != expected)
        .count()
}
