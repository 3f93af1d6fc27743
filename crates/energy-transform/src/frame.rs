//! Column access on raw run tables and construction of star-schema frames.
//!
//! Raw tables are read cell by cell through `AnyValue` so that exports with
//! loosely inferred dtypes (integer ids, numeric strings, text timestamps)
//! are handled uniformly.

use std::fmt;

use chrono::NaiveDateTime;
use polars::prelude::{AnyValue, Column, DataFrame};

use energy_common::{any_to_datetime, any_to_f64, any_to_i64, any_to_string};
use energy_model::table::columns;
use energy_model::{RawTable, RunRecord, TableName};

use crate::error::{Result, TransformError};

/// An entity natural key as read from a raw table.
///
/// Integer ids order numerically and text ids lexicographically, so
/// surrogate keys follow `(building_id, natural_id)` in the id's own type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum NaturalId {
    Int(i64),
    Text(String),
}

impl NaturalId {
    fn from_cell(cell: AnyValue<'_>) -> Self {
        let integer = match &cell {
            AnyValue::Int8(_)
            | AnyValue::Int16(_)
            | AnyValue::Int32(_)
            | AnyValue::Int64(_)
            | AnyValue::UInt8(_)
            | AnyValue::UInt16(_)
            | AnyValue::UInt32(_)
            | AnyValue::UInt64(_) => any_to_i64(cell.clone()),
            _ => None,
        };
        match integer {
            Some(value) => Self::Int(value),
            None => Self::Text(any_to_string(cell).trim().to_string()),
        }
    }
}

impl fmt::Display for NaturalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// One raw table of one run, with errors attributed to that run.
pub(crate) struct RunTable<'a> {
    run: &'a RunRecord,
    table: RawTable,
    data: &'a DataFrame,
}

impl<'a> RunTable<'a> {
    pub(crate) fn new(run: &'a RunRecord, table: RawTable) -> Self {
        Self {
            run,
            table,
            data: run.table(table),
        }
    }

    fn cells(&self, column: &'static str) -> Result<Vec<AnyValue<'a>>> {
        let read_error = |source| TransformError::ColumnRead {
            run_id: self.run.run_id().to_string(),
            table: self.table,
            column,
            source,
        };
        let series = self.data.column(column).map_err(read_error)?;
        (0..self.data.height())
            .map(|idx| series.get(idx).map_err(read_error))
            .collect()
    }

    /// Timestamps of every row; a null or unparseable cell is an error.
    pub(crate) fn timestamps(&self) -> Result<Vec<NaiveDateTime>> {
        self.cells(columns::TIMESTAMP)?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                let value = any_to_string(cell.clone());
                any_to_datetime(cell).ok_or_else(|| TransformError::InvalidTimestamp {
                    run_id: self.run.run_id().to_string(),
                    table: self.table,
                    row,
                    value,
                })
            })
            .collect()
    }

    /// Entity natural keys; a null cell is an error.
    pub(crate) fn keys(&self, column: &'static str) -> Result<Vec<NaturalId>> {
        self.cells(column)?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                AnyValue::Null => Err(TransformError::NullKey {
                    run_id: self.run.run_id().to_string(),
                    table: self.table,
                    column,
                    row,
                }),
                other => Ok(NaturalId::from_cell(other)),
            })
            .collect()
    }

    /// Optional text attributes.
    pub(crate) fn texts(&self, column: &'static str) -> Result<Vec<Option<String>>> {
        Ok(self
            .cells(column)?
            .into_iter()
            .map(|cell| match cell {
                AnyValue::Null => None,
                other => Some(any_to_string(other)),
            })
            .collect())
    }

    /// Numeric measures; nulls and non-numeric cells read as missing.
    pub(crate) fn floats(&self, column: &'static str) -> Result<Vec<Option<f64>>> {
        Ok(self.cells(column)?.into_iter().map(any_to_f64).collect())
    }
}

/// A set of measure columns copied from raw rows into a fact table.
pub(crate) struct MeasureBlock {
    names: &'static [&'static str],
    output: Vec<Vec<Option<f64>>>,
}

impl MeasureBlock {
    pub(crate) fn new(names: &'static [&'static str]) -> Self {
        Self {
            names,
            output: vec![Vec::new(); names.len()],
        }
    }

    /// Read every measure column of a raw table, in declaration order.
    pub(crate) fn read(&self, raw: &RunTable<'_>) -> Result<Vec<Vec<Option<f64>>>> {
        self.names.iter().map(|name| raw.floats(name)).collect()
    }

    pub(crate) fn push_row(&mut self, source: &[Vec<Option<f64>>], row: usize) {
        for (output, values) in self.output.iter_mut().zip(source) {
            output.push(values[row]);
        }
    }

    pub(crate) fn into_columns(self) -> Vec<Column> {
        self.names
            .iter()
            .zip(self.output)
            .map(|(name, values)| Column::new((*name).into(), values))
            .collect()
    }
}

/// Assemble a star-schema table, checking the declared column order.
pub(crate) fn build_frame(table: TableName, columns: Vec<Column>) -> Result<DataFrame> {
    debug_assert!(
        columns
            .iter()
            .map(|column| column.name().as_str())
            .eq(table.columns().iter().copied()),
        "{table} columns out of catalog order"
    );
    DataFrame::new(columns).map_err(|source| TransformError::Polars { table, source })
}

