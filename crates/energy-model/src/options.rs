//! Configuration options for schema assembly and validation.
//!
//! Every threshold below is a tunable heuristic rather than a physical
//! constant, so each one is configurable. All structs deserialize from
//! partial JSON; omitted fields take their defaults.

use serde::{Deserialize, Serialize};

/// Options controlling fact derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Minimum HVAC electrical power (kW) for which `cop_proxy` is computed.
    ///
    /// Below it the ratio `(heating + cooling) / power` has a near-zero
    /// denominator and is reported as null.
    pub cop_min_power_kw: f64,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            cop_min_power_kw: 1.0,
        }
    }
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cop_min_power_kw(mut self, threshold: f64) -> Self {
        self.cop_min_power_kw = threshold;
        self
    }
}

/// Options controlling the validator checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Expected spacing between consecutive `dim_time` timestamps.
    pub expected_interval_minutes: i64,

    /// Lowest acceptable ratio of total electric energy to total
    /// heating + cooling energy per building and scenario.
    pub min_electric_ratio: f64,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            expected_interval_minutes: 60,
            min_electric_ratio: 0.2,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expected_interval_minutes(mut self, minutes: i64) -> Self {
        self.expected_interval_minutes = minutes;
        self
    }

    pub fn with_min_electric_ratio(mut self, ratio: f64) -> Self {
        self.min_electric_ratio = ratio;
        self
    }

    /// Human-readable label for the expected interval.
    pub fn interval_label(&self) -> String {
        match self.expected_interval_minutes {
            60 => "hourly".to_string(),
            1440 => "daily".to_string(),
            minutes if minutes > 0 && minutes % 60 == 0 => format!("{}-hour", minutes / 60),
            minutes => format!("{minutes}-minute"),
        }
    }
}

/// All options for one pipeline invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub transform: TransformOptions,
    pub validation: ValidationOptions,
}
