//! Errors for schemas the validator cannot inspect at all.

use energy_model::TableName;
use thiserror::Error;

/// Raised only when the schema is structurally unusable.
///
/// Data-quality findings never surface here; they are reported as check
/// errors in the [`ValidationReport`](energy_model::ValidationReport).
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("time dimension table not found")]
    MissingTimeDimension,

    #[error("{table} is missing required column '{column}'")]
    MissingTimeColumn {
        table: TableName,
        column: &'static str,
    },
}

/// Result type for validation.
pub type Result<T> = std::result::Result<T, ValidateError>;
