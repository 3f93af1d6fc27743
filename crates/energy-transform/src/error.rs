//! Error types for star-schema assembly.

use energy_model::{ModelError, RawTable, TableName};
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that abort schema assembly.
///
/// Per-run variants carry the run id so a failure is attributable to the
/// export that caused it. Unresolved joins are not errors; they surface as
/// null keys in the fact tables.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A timestamp cell was null or not a recognizable instant.
    #[error("run {run_id}: {table} row {row} has invalid timestamp '{value}'")]
    InvalidTimestamp {
        run_id: String,
        table: RawTable,
        row: usize,
        value: String,
    },

    /// An entity natural key cell was null.
    #[error("run {run_id}: {table} row {row} has a null {column}")]
    NullKey {
        run_id: String,
        table: RawTable,
        column: &'static str,
        row: usize,
    },

    /// Reading a raw column failed.
    #[error("run {run_id}: failed to read {table}.{column}: {source}")]
    ColumnRead {
        run_id: String,
        table: RawTable,
        column: &'static str,
        #[source]
        source: PolarsError,
    },

    /// A fact builder received a dimension table without the columns it joins on.
    #[error("{table} is missing column '{column}'; dimensions must be built before facts")]
    DimensionContract {
        table: TableName,
        column: &'static str,
    },

    /// Polars failed while reading or building a star-schema table.
    #[error("failed to build {table}: {source}")]
    Polars {
        table: TableName,
        #[source]
        source: PolarsError,
    },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_run() {
        let err = TransformError::NullKey {
            run_id: "run_B001_BASE".to_string(),
            table: RawTable::Zones,
            column: "zone_id",
            row: 3,
        };
        assert_eq!(err.to_string(), "run run_B001_BASE: zones row 3 has a null zone_id");
    }

    #[test]
    fn test_error_from_model() {
        let err: TransformError = ModelError::EmptyRunId.into();
        assert!(matches!(err, TransformError::Model(ModelError::EmptyRunId)));
    }
}
