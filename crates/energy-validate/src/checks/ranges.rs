//! Value-range plausibility of fact measures.
//!
//! Limits are fixed physical plausibility bounds. Only the count of
//! offending rows is reported, and null measures never count.

use energy_model::table::columns;
use energy_model::{StarSchema, TableName};

use crate::util::floats;

/// Inclusive bounds for one measure column.
struct Bound {
    table: TableName,
    column: &'static str,
    min: Option<f64>,
    max: Option<f64>,
    /// Message tail after the offending count.
    description: &'static str,
}

impl Bound {
    const fn between(
        table: TableName,
        column: &'static str,
        min: f64,
        max: f64,
        description: &'static str,
    ) -> Self {
        Self {
            table,
            column,
            min: Some(min),
            max: Some(max),
            description,
        }
    }

    const fn non_negative(table: TableName, column: &'static str, description: &'static str) -> Self {
        Self {
            table,
            column,
            min: Some(0.0),
            max: None,
            description,
        }
    }

    fn violates(&self, value: f64) -> bool {
        self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max)
    }
}

const BOUNDS: &[Bound] = &[
    Bound::between(
        TableName::FactZoneConditions,
        columns::AIR_TEMP_C,
        10.0,
        35.0,
        "air temperatures out of range (10-35°C)",
    ),
    Bound::between(
        TableName::FactZoneConditions,
        columns::CO2_PPM,
        400.0,
        2500.0,
        "CO2 values out of range (400-2500 ppm)",
    ),
    Bound::between(
        TableName::FactZoneConditions,
        columns::RH_PCT,
        0.0,
        100.0,
        "RH values out of range (0-100%)",
    ),
    Bound::between(
        TableName::FactWeather,
        columns::DRYBULB_C,
        -30.0,
        40.0,
        "temperatures out of range (-30 to 40°C)",
    ),
    Bound::between(
        TableName::FactWeather,
        columns::RELHUM_PCT,
        0.0,
        100.0,
        "RH values out of range (0-100%)",
    ),
    Bound::non_negative(TableName::FactWeather, columns::GHI_W_M2, "GHI values negative"),
    Bound::non_negative(TableName::FactHvac, columns::POWER_KW, "negative power values"),
    Bound::non_negative(TableName::FactHvac, columns::HEATING_KW, "negative heating values"),
    Bound::non_negative(TableName::FactHvac, columns::COOLING_KW, "negative cooling values"),
    Bound::non_negative(TableName::FactMeters, columns::ELECTRIC_KWH, "negative electric_kwh values"),
    Bound::non_negative(TableName::FactMeters, columns::HEATING_KWH, "negative heating_kwh values"),
    Bound::non_negative(TableName::FactMeters, columns::COOLING_KWH, "negative cooling_kwh values"),
];

fn label(table: TableName) -> &'static str {
    match table {
        TableName::FactZoneConditions => "Zone conditions",
        TableName::FactWeather => "Weather",
        TableName::FactHvac => "HVAC",
        TableName::FactMeters => "Meters",
        other => other.as_str(),
    }
}

pub(crate) fn check(schema: &StarSchema) -> Vec<String> {
    let mut errors = Vec::new();
    for bound in BOUNDS {
        // Absent tables and columns are structural findings
        let Some(values) = schema.get(bound.table).and_then(|df| floats(df, bound.column)) else {
            continue;
        };
        // Nulls are skipped by flatten
        let violations = values
            .into_iter()
            .flatten()
            .filter(|value| bound.violates(*value))
            .count();
        if violations > 0 {
            errors.push(format!(
                "{}: {violations} {}",
                label(bound.table),
                bound.description
            ));
        }
    }
    errors
}
