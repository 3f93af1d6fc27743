//! Energy plausibility per building and scenario.

use std::collections::BTreeMap;

use energy_model::table::columns;
use energy_model::{StarSchema, TableName, ValidationOptions};

use crate::util::{floats, keys};

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    electric: f64,
    heating: f64,
    cooling: f64,
}

impl Totals {
    fn thermal(self) -> f64 {
        self.heating + self.cooling
    }
}

pub(crate) fn check(schema: &StarSchema, options: &ValidationOptions) -> Vec<String> {
    let Some(meters) = schema.get(TableName::FactMeters) else {
        return vec!["Meters fact table not found".to_string()];
    };

    // Group keys and measures must all be present
    let missing_column = |column: &str| format!("Meters fact table missing column '{column}'");
    let Some(buildings) = keys(meters, columns::BUILDING_ID) else {
        return vec![missing_column(columns::BUILDING_ID)];
    };
    let Some(scenarios) = keys(meters, columns::SCENARIO_ID) else {
        return vec![missing_column(columns::SCENARIO_ID)];
    };
    let mut measures = Vec::with_capacity(3);
    for column in [columns::ELECTRIC_KWH, columns::HEATING_KWH, columns::COOLING_KWH] {
        match floats(meters, column) {
            Some(values) => measures.push(values),
            None => return vec![missing_column(column)],
        }
    }

    // Sum each measure per (building_id, scenario_id), skipping null keys
    let mut groups: BTreeMap<(&str, &str), Totals> = BTreeMap::new();
    for (row, (building, scenario)) in buildings.iter().zip(&scenarios).enumerate() {
        let (Some(building), Some(scenario)) = (building, scenario) else {
            continue;
        };
        let totals = groups.entry((building.as_str(), scenario.as_str())).or_default();
        // Null readings contribute nothing
        totals.electric += measures[0][row].unwrap_or(0.0);
        totals.heating += measures[1][row].unwrap_or(0.0);
        totals.cooling += measures[2][row].unwrap_or(0.0);
    }

    let mut errors = Vec::new();
    for ((building, scenario), totals) in groups {
        if totals.electric <= 0.0 {
            errors.push(format!(
                "Building {building} / {scenario}: total electric energy <= 0"
            ));
        }
        if totals.thermal() <= 0.0 {
            errors.push(format!(
                "Building {building} / {scenario}: total heating + cooling energy <= 0"
            ));
        }
        // Electric share of heating + cooling
        if totals.electric < options.min_electric_ratio * totals.thermal() {
            errors.push(format!(
                "Building {building} / {scenario}: electric energy seems too low relative to \
                 heating+cooling (electric: {:.0}, heating+cooling: {:.0})",
                totals.electric,
                totals.thermal()
            ));
        }
    }
    errors
}
