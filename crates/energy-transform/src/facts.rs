//! Fact builders.
//!
//! Every builder left-joins a raw run table against the built dimensions:
//! timestamps resolve through `dim_time`, zone and AHU ids through their
//! dimension, and anything unresolved stays as a null key for the validator
//! to report. Per-run results are concatenated in run order.

use polars::prelude::{Column, DataFrame};

use energy_model::table::columns;
use energy_model::{RawTable, RunRecord, TableName, TransformOptions};

use crate::error::Result;
use crate::frame::{MeasureBlock, RunTable, build_frame};
use crate::lookup::{EntityLookup, TimeLookup, building_ids};

const ZONE_MEASURES: &[&str] = &[
    columns::AIR_TEMP_C,
    columns::SETPOINT_C,
    columns::CO2_PPM,
    columns::RH_PCT,
];

const HVAC_MEASURES: &[&str] = &[
    columns::SUPPLY_TEMP_C,
    columns::RETURN_TEMP_C,
    columns::POWER_KW,
    columns::COOLING_KW,
    columns::HEATING_KW,
];

const METER_MEASURES: &[&str] = &[
    columns::ELECTRIC_KWH,
    columns::HEATING_KWH,
    columns::COOLING_KWH,
];

const WEATHER_MEASURES: &[&str] = &[columns::DRYBULB_C, columns::RELHUM_PCT, columns::GHI_W_M2];

/// Coefficient-of-performance proxy for one HVAC reading.
///
/// `(heating_kw + cooling_kw) / power_kw` when `power_kw >= min_power_kw`,
/// otherwise `None`. Any missing input also yields `None`.
///
/// # Examples
///
/// ```
/// use energy_transform::cop_proxy;
///
/// assert_eq!(cop_proxy(Some(2.0), Some(3.0), Some(1.0), 1.0), Some(2.0));
/// assert_eq!(cop_proxy(Some(0.5), Some(2.0), Some(1.0), 1.0), None);
/// ```
pub fn cop_proxy(
    power_kw: Option<f64>,
    heating_kw: Option<f64>,
    cooling_kw: Option<f64>,
    min_power_kw: f64,
) -> Option<f64> {
    let power = power_kw.filter(|power| *power >= min_power_kw)?;
    Some((heating_kw? + cooling_kw?) / power)
}

/// `fact_zone_conditions` at grain `(time_key, zone_key, scenario_id)`.
pub fn build_fact_zone_conditions(
    runs: &[RunRecord],
    dim_time: &DataFrame,
    dim_zone: &DataFrame,
) -> Result<DataFrame> {
    let times = TimeLookup::from_dim_time(dim_time)?;
    let zones = EntityLookup::from_dim_zone(dim_zone)?;

    let mut time_keys = Vec::new();
    let mut zone_keys = Vec::new();
    let mut scenario_ids = Vec::new();
    let mut measures = MeasureBlock::new(ZONE_MEASURES);

    for run in runs {
        let raw = RunTable::new(run, RawTable::Zones);
        let timestamps = raw.timestamps()?;
        let ids = raw.keys(columns::ZONE_ID)?;
        let values = measures.read(&raw)?;

        for (row, (timestamp, id)) in timestamps.iter().zip(&ids).enumerate() {
            let time_key = times.get(timestamp);
            for zone_key in zones.resolve(run.building_id(), &id.to_string()) {
                time_keys.push(time_key);
                zone_keys.push(zone_key);
                scenario_ids.push(run.scenario_id());
                measures.push_row(&values, row);
            }
        }
    }

    let mut frame_columns = vec![
        Column::new(columns::TIME_KEY.into(), time_keys),
        Column::new(columns::ZONE_KEY.into(), zone_keys),
        Column::new(columns::SCENARIO_ID.into(), scenario_ids),
    ];
    frame_columns.extend(measures.into_columns());
    build_frame(TableName::FactZoneConditions, frame_columns)
}

/// `fact_hvac` at grain `(time_key, ahu_key, scenario_id)`, with `cop_proxy`.
pub fn build_fact_hvac(
    runs: &[RunRecord],
    dim_time: &DataFrame,
    dim_ahu: &DataFrame,
    options: &TransformOptions,
) -> Result<DataFrame> {
    let times = TimeLookup::from_dim_time(dim_time)?;
    let units = EntityLookup::from_dim_ahu(dim_ahu)?;

    let mut time_keys = Vec::new();
    let mut ahu_keys = Vec::new();
    let mut scenario_ids = Vec::new();
    let mut cop = Vec::new();
    let mut measures = MeasureBlock::new(HVAC_MEASURES);

    for run in runs {
        let raw = RunTable::new(run, RawTable::Hvac);
        let timestamps = raw.timestamps()?;
        let ids = raw.keys(columns::AHU_ID)?;
        let power = raw.floats(columns::POWER_KW)?;
        let heating = raw.floats(columns::HEATING_KW)?;
        let cooling = raw.floats(columns::COOLING_KW)?;
        let values = measures.read(&raw)?;

        for (row, (timestamp, id)) in timestamps.iter().zip(&ids).enumerate() {
            let time_key = times.get(timestamp);
            let row_cop = cop_proxy(power[row], heating[row], cooling[row], options.cop_min_power_kw);
            for ahu_key in units.resolve(run.building_id(), &id.to_string()) {
                time_keys.push(time_key);
                ahu_keys.push(ahu_key);
                scenario_ids.push(run.scenario_id());
                measures.push_row(&values, row);
                cop.push(row_cop);
            }
        }
    }

    let mut frame_columns = vec![
        Column::new(columns::TIME_KEY.into(), time_keys),
        Column::new(columns::AHU_KEY.into(), ahu_keys),
        Column::new(columns::SCENARIO_ID.into(), scenario_ids),
    ];
    frame_columns.extend(measures.into_columns());
    frame_columns.push(Column::new(columns::COP_PROXY.into(), cop));
    build_frame(TableName::FactHvac, frame_columns)
}

/// `fact_meters` at grain `(time_key, building_id, scenario_id)`.
pub fn build_fact_meters(runs: &[RunRecord], dim_time: &DataFrame) -> Result<DataFrame> {
    let times = TimeLookup::from_dim_time(dim_time)?;

    let mut time_keys = Vec::new();
    let mut building_col = Vec::new();
    let mut scenario_ids = Vec::new();
    let mut measures = MeasureBlock::new(METER_MEASURES);

    for run in runs {
        let raw = RunTable::new(run, RawTable::Meters);
        let timestamps = raw.timestamps()?;
        let values = measures.read(&raw)?;

        for (row, timestamp) in timestamps.iter().enumerate() {
            time_keys.push(times.get(timestamp));
            building_col.push(run.building_id());
            scenario_ids.push(run.scenario_id());
            measures.push_row(&values, row);
        }
    }

    let mut frame_columns = vec![
        Column::new(columns::TIME_KEY.into(), time_keys),
        Column::new(columns::BUILDING_ID.into(), building_col),
        Column::new(columns::SCENARIO_ID.into(), scenario_ids),
    ];
    frame_columns.extend(measures.into_columns());
    build_frame(TableName::FactMeters, frame_columns)
}

/// `fact_weather` at grain `(time_key, building_id)`.
///
/// Weather does not vary by scenario, so the first run's series is joined
/// once and copied for every building in `dim_building` order. No runs
/// yields an empty table.
pub fn build_fact_weather(
    runs: &[RunRecord],
    dim_time: &DataFrame,
    dim_building: &DataFrame,
) -> Result<DataFrame> {
    let times = TimeLookup::from_dim_time(dim_time)?;
    let buildings = building_ids(dim_building)?;

    let mut time_keys = Vec::new();
    let mut building_col = Vec::new();
    let mut measures = MeasureBlock::new(WEATHER_MEASURES);

    if let Some(first) = runs.first() {
        let raw = RunTable::new(first, RawTable::Weather);
        let series: Vec<Option<i64>> = raw
            .timestamps()?
            .iter()
            .map(|timestamp| times.get(timestamp))
            .collect();
        let values = measures.read(&raw)?;

        for building in &buildings {
            for (row, time_key) in series.iter().enumerate() {
                time_keys.push(*time_key);
                building_col.push(building.as_str());
                measures.push_row(&values, row);
            }
        }
    }

    let mut frame_columns = vec![
        Column::new(columns::TIME_KEY.into(), time_keys),
        Column::new(columns::BUILDING_ID.into(), building_col),
    ];
    frame_columns.extend(measures.into_columns());
    build_frame(TableName::FactWeather, frame_columns)
}
