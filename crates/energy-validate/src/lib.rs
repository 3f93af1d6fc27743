//! Quality checks for the assembled star schema.
//!
//! [`validate_all`] runs four independent checks and aggregates them into a
//! [`ValidationReport`]:
//!
//! - **schema**: every table and declared column present, no unexpected
//!   nulls, foreign keys resolving, fact grains unique
//! - **value_ranges**: physical plausibility bounds on measures
//! - **temporal_coverage**: uniform `dim_time` spacing and complete fact
//!   coverage of every time key
//! - **energy_plausibility**: per building and scenario energy balance
//!
//! Findings are data in the report. Only a schema without a usable time
//! dimension is an error.

mod checks;
pub mod error;
mod summary;
mod util;

use energy_model::{CheckName, CheckResult, StarSchema, ValidationOptions, ValidationReport};
use tracing::{debug, info, info_span};

pub use error::{Result, ValidateError};
pub use summary::render_summary;

/// Run every check against `schema` and aggregate the verdict.
pub fn validate_all(schema: &StarSchema, options: &ValidationOptions) -> Result<ValidationReport> {
    let span = info_span!("validate_all", tables = schema.len());
    let _guard = span.enter();

    let temporal = checks::temporal::check(schema, options)?;

    let mut report = ValidationReport::new();
    for (name, errors) in [
        (CheckName::Schema, checks::structure::check(schema)),
        (CheckName::ValueRanges, checks::ranges::check(schema)),
        (CheckName::TemporalCoverage, temporal),
        (
            CheckName::EnergyPlausibility,
            checks::energy::check(schema, options),
        ),
    ] {
        debug!(check = name.as_str(), errors = errors.len(), "Check finished");
        report.add(name, CheckResult::from_errors(errors));
    }

    info!(
        is_valid = report.is_valid,
        passed = report.passed_count(),
        errors = report.error_count(),
        "Validation finished"
    );
    Ok(report)
}
