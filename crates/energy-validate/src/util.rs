//! Cell access helpers shared by the checks.

use chrono::NaiveDateTime;
use polars::prelude::{AnyValue, DataFrame};

use energy_common::{any_to_datetime, any_to_f64, any_to_i64, any_to_string};

/// All cells of a column, or `None` when the column is absent.
pub(crate) fn cells<'a>(df: &'a DataFrame, column: &str) -> Option<Vec<AnyValue<'a>>> {
    let series = df.column(column).ok()?;
    Some(
        (0..df.height())
            .map(|idx| series.get(idx).unwrap_or(AnyValue::Null))
            .collect(),
    )
}

pub(crate) fn floats(df: &DataFrame, column: &str) -> Option<Vec<Option<f64>>> {
    cells(df, column).map(|values| values.into_iter().map(any_to_f64).collect())
}

pub(crate) fn ints(df: &DataFrame, column: &str) -> Option<Vec<Option<i64>>> {
    cells(df, column).map(|values| values.into_iter().map(any_to_i64).collect())
}

pub(crate) fn datetimes(df: &DataFrame, column: &str) -> Option<Vec<Option<NaiveDateTime>>> {
    cells(df, column).map(|values| values.into_iter().map(any_to_datetime).collect())
}

/// Text keys; nulls stay `None` so they never match a real key.
pub(crate) fn keys(df: &DataFrame, column: &str) -> Option<Vec<Option<String>>> {
    cells(df, column).map(|values| {
        values
            .into_iter()
            .map(|value| match value {
                AnyValue::Null => None,
                other => Some(any_to_string(other)),
            })
            .collect()
    })
}
