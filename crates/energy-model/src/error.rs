//! Errors raised at the run-record boundary.

use thiserror::Error;

use crate::run::RawTable;

/// Input-shape errors. Each one is fatal to the run it names.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("run id must not be empty")]
    EmptyRunId,

    #[error("run {run_id}: metadata must be a JSON object")]
    MetadataNotObject { run_id: String },

    #[error("run {run_id}: metadata is missing required field '{field}'")]
    MissingMetadataField { run_id: String, field: &'static str },

    #[error("run {run_id}: metadata field '{field}' is invalid: {reason}")]
    InvalidMetadataField {
        run_id: String,
        field: &'static str,
        reason: String,
    },

    #[error("run {run_id}: {table} table is missing required column '{column}'")]
    MissingColumn {
        run_id: String,
        table: RawTable,
        column: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
