//! Validation verdict types.
//!
//! Serialized form:
//! `{"is_valid": bool, "checks": {"<check>": {"valid": bool, "errors": [..]}}}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The four validator checks, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    Schema,
    ValueRanges,
    TemporalCoverage,
    EnergyPlausibility,
}

impl CheckName {
    pub const ALL: [CheckName; 4] = [
        Self::Schema,
        Self::ValueRanges,
        Self::TemporalCoverage,
        Self::EnergyPlausibility,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::ValueRanges => "value_ranges",
            Self::TemporalCoverage => "temporal_coverage",
            Self::EnergyPlausibility => "energy_plausibility",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl CheckResult {
    /// A check is valid exactly when it reported no errors.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Aggregated verdict of all checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub checks: BTreeMap<CheckName, CheckResult>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            checks: BTreeMap::new(),
        }
    }

    /// Record a check result; any failing check fails the whole report.
    pub fn add(&mut self, name: CheckName, result: CheckResult) {
        self.is_valid &= result.valid;
        self.checks.insert(name, result);
    }

    pub fn check(&self, name: CheckName) -> Option<&CheckResult> {
        self.checks.get(&name)
    }

    pub fn error_count(&self) -> usize {
        self.checks.values().map(|check| check.errors.len()).sum()
    }

    pub fn passed_count(&self) -> usize {
        self.checks.values().filter(|check| check.valid).count()
    }

    pub fn failed_checks(&self) -> Vec<CheckName> {
        self.checks
            .iter()
            .filter(|(_, check)| !check.valid)
            .map(|(name, _)| *name)
            .collect()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
