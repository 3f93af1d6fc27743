//! Star-schema assembly: every dimension first, then every fact.

use tracing::{debug, info, info_span};

use energy_model::{RunRecord, StarSchema, TableName, TransformOptions};

use crate::dimensions::{
    build_dim_ahu, build_dim_building, build_dim_scenario, build_dim_time, build_dim_zone,
};
use crate::error::Result;
use crate::facts::{
    build_fact_hvac, build_fact_meters, build_fact_weather, build_fact_zone_conditions,
};

/// Build all nine star-schema tables from the ordered run list.
///
/// Either every table is produced or the first error is returned; no
/// partial schema escapes. Surrogate keys are only stable within one call.
pub fn build_star_schema(runs: &[RunRecord], options: &TransformOptions) -> Result<StarSchema> {
    let span = info_span!("build_star_schema", runs = runs.len());
    let _guard = span.enter();

    let dim_building = build_dim_building(runs)?;
    let dim_scenario = build_dim_scenario(runs)?;
    let dim_zone = build_dim_zone(runs)?;
    let dim_ahu = build_dim_ahu(runs)?;
    let dim_time = build_dim_time(runs)?;

    let fact_zone_conditions = build_fact_zone_conditions(runs, &dim_time, &dim_zone)?;
    let fact_hvac = build_fact_hvac(runs, &dim_time, &dim_ahu, options)?;
    let fact_meters = build_fact_meters(runs, &dim_time)?;
    let fact_weather = build_fact_weather(runs, &dim_time, &dim_building)?;

    let schema: StarSchema = [
        (TableName::DimBuilding, dim_building),
        (TableName::DimScenario, dim_scenario),
        (TableName::DimZone, dim_zone),
        (TableName::DimAhu, dim_ahu),
        (TableName::DimTime, dim_time),
        (TableName::FactZoneConditions, fact_zone_conditions),
        (TableName::FactHvac, fact_hvac),
        (TableName::FactMeters, fact_meters),
        (TableName::FactWeather, fact_weather),
    ]
    .into_iter()
    .collect();

    for (table, frame) in schema.iter() {
        debug!(table = table.as_str(), rows = frame.height(), "Built table");
    }
    info!(tables = schema.len(), "Star schema assembled");
    Ok(schema)
}
