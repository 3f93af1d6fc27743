//! Star-schema table catalog.
//!
//! Declares the nine output tables, their column order, which columns may
//! hold nulls, the grain of each fact table and the foreign keys facts use
//! to reference dimensions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column names shared by raw run tables and star-schema tables.
pub mod columns {
    pub const TIMESTAMP: &str = "timestamp";
    pub const TIME_KEY: &str = "time_key";
    pub const YEAR: &str = "year";
    pub const MONTH: &str = "month";
    pub const DAY: &str = "day";
    pub const HOUR: &str = "hour";
    pub const DOW: &str = "dow";
    pub const IS_WEEKEND: &str = "is_weekend";

    pub const BUILDING_ID: &str = "building_id";
    pub const BUILDING_NAME: &str = "building_name";
    pub const LOCATION: &str = "location";
    pub const FLOOR_AREA_M2: &str = "floor_area_m2";

    pub const SCENARIO_ID: &str = "scenario_id";
    pub const DESCRIPTION: &str = "description";

    pub const ZONE_KEY: &str = "zone_key";
    pub const ZONE_ID: &str = "zone_id";
    pub const ZONE_NAME: &str = "zone_name";

    pub const AHU_KEY: &str = "ahu_key";
    pub const AHU_ID: &str = "ahu_id";

    pub const AIR_TEMP_C: &str = "air_temp_C";
    pub const SETPOINT_C: &str = "setpoint_C";
    pub const CO2_PPM: &str = "co2_ppm";
    pub const RH_PCT: &str = "rh_pct";

    pub const SUPPLY_TEMP_C: &str = "supply_temp_C";
    pub const RETURN_TEMP_C: &str = "return_temp_C";
    pub const POWER_KW: &str = "power_kw";
    pub const COOLING_KW: &str = "cooling_kw";
    pub const HEATING_KW: &str = "heating_kw";
    pub const COP_PROXY: &str = "cop_proxy";

    pub const ELECTRIC_KWH: &str = "electric_kwh";
    pub const HEATING_KWH: &str = "heating_kwh";
    pub const COOLING_KWH: &str = "cooling_kwh";

    pub const DRYBULB_C: &str = "drybulb_C";
    pub const RELHUM_PCT: &str = "relhum_pct";
    pub const GHI_W_M2: &str = "ghi_W_m2";
}

use columns as c;

/// A fact column referencing a dimension column of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: TableName,
}

const fn fk(column: &'static str, references: TableName) -> ForeignKey {
    ForeignKey { column, references }
}

/// The nine tables of the star schema. Dimensions sort before facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    DimBuilding,
    DimScenario,
    DimZone,
    DimAhu,
    DimTime,
    FactZoneConditions,
    FactHvac,
    FactMeters,
    FactWeather,
}

impl TableName {
    pub const ALL: [TableName; 9] = [
        Self::DimBuilding,
        Self::DimScenario,
        Self::DimZone,
        Self::DimAhu,
        Self::DimTime,
        Self::FactZoneConditions,
        Self::FactHvac,
        Self::FactMeters,
        Self::FactWeather,
    ];

    pub const FACTS: [TableName; 4] = [
        Self::FactZoneConditions,
        Self::FactHvac,
        Self::FactMeters,
        Self::FactWeather,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DimBuilding => "dim_building",
            Self::DimScenario => "dim_scenario",
            Self::DimZone => "dim_zone",
            Self::DimAhu => "dim_ahu",
            Self::DimTime => "dim_time",
            Self::FactZoneConditions => "fact_zone_conditions",
            Self::FactHvac => "fact_hvac",
            Self::FactMeters => "fact_meters",
            Self::FactWeather => "fact_weather",
        }
    }

    /// Look up a table by its persisted name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.as_str() == name)
    }

    pub fn is_fact(self) -> bool {
        Self::FACTS.contains(&self)
    }

    /// Declared columns, in output order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::DimBuilding => &[c::BUILDING_ID, c::BUILDING_NAME, c::LOCATION, c::FLOOR_AREA_M2],
            Self::DimScenario => &[c::SCENARIO_ID, c::DESCRIPTION],
            Self::DimZone => &[c::ZONE_KEY, c::BUILDING_ID, c::ZONE_ID, c::ZONE_NAME],
            Self::DimAhu => &[c::AHU_KEY, c::BUILDING_ID, c::AHU_ID],
            Self::DimTime => &[
                c::TIME_KEY,
                c::TIMESTAMP,
                c::YEAR,
                c::MONTH,
                c::DAY,
                c::HOUR,
                c::DOW,
                c::IS_WEEKEND,
            ],
            Self::FactZoneConditions => &[
                c::TIME_KEY,
                c::ZONE_KEY,
                c::SCENARIO_ID,
                c::AIR_TEMP_C,
                c::SETPOINT_C,
                c::CO2_PPM,
                c::RH_PCT,
            ],
            Self::FactHvac => &[
                c::TIME_KEY,
                c::AHU_KEY,
                c::SCENARIO_ID,
                c::SUPPLY_TEMP_C,
                c::RETURN_TEMP_C,
                c::POWER_KW,
                c::COOLING_KW,
                c::HEATING_KW,
                c::COP_PROXY,
            ],
            Self::FactMeters => &[
                c::TIME_KEY,
                c::BUILDING_ID,
                c::SCENARIO_ID,
                c::ELECTRIC_KWH,
                c::HEATING_KWH,
                c::COOLING_KWH,
            ],
            Self::FactWeather => &[c::TIME_KEY, c::BUILDING_ID, c::DRYBULB_C, c::RELHUM_PCT, c::GHI_W_M2],
        }
    }

    /// Columns allowed to hold nulls.
    ///
    /// `cop_proxy` is null whenever HVAC power is below the COP threshold.
    pub fn nullable_columns(self) -> &'static [&'static str] {
        match self {
            Self::FactHvac => &[c::COP_PROXY],
            _ => &[],
        }
    }

    /// Key columns identifying one row. Empty for dimensions.
    pub fn grain(self) -> &'static [&'static str] {
        match self {
            Self::FactZoneConditions => &[c::TIME_KEY, c::ZONE_KEY, c::SCENARIO_ID],
            Self::FactHvac => &[c::TIME_KEY, c::AHU_KEY, c::SCENARIO_ID],
            Self::FactMeters => &[c::TIME_KEY, c::BUILDING_ID, c::SCENARIO_ID],
            Self::FactWeather => &[c::TIME_KEY, c::BUILDING_ID],
            _ => &[],
        }
    }

    pub fn foreign_keys(self) -> &'static [ForeignKey] {
        const ZONE_CONDITIONS: [ForeignKey; 3] = [
            fk(c::TIME_KEY, TableName::DimTime),
            fk(c::ZONE_KEY, TableName::DimZone),
            fk(c::SCENARIO_ID, TableName::DimScenario),
        ];
        const HVAC: [ForeignKey; 3] = [
            fk(c::TIME_KEY, TableName::DimTime),
            fk(c::AHU_KEY, TableName::DimAhu),
            fk(c::SCENARIO_ID, TableName::DimScenario),
        ];
        const METERS: [ForeignKey; 3] = [
            fk(c::TIME_KEY, TableName::DimTime),
            fk(c::BUILDING_ID, TableName::DimBuilding),
            fk(c::SCENARIO_ID, TableName::DimScenario),
        ];
        const WEATHER: [ForeignKey; 2] = [
            fk(c::TIME_KEY, TableName::DimTime),
            fk(c::BUILDING_ID, TableName::DimBuilding),
        ];
        match self {
            Self::FactZoneConditions => &ZONE_CONDITIONS,
            Self::FactHvac => &HVAC,
            Self::FactMeters => &METERS,
            Self::FactWeather => &WEATHER,
            _ => &[],
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
