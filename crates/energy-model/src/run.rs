//! Run records: one extracted simulation run.

use std::fmt;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::metadata::RunMetadata;
use crate::table::columns;

/// The four raw per-timestamp tables of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawTable {
    Zones,
    Hvac,
    Meters,
    Weather,
}

impl RawTable {
    pub const ALL: [RawTable; 4] = [Self::Zones, Self::Hvac, Self::Meters, Self::Weather];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zones => "zones",
            Self::Hvac => "hvac",
            Self::Meters => "meters",
            Self::Weather => "weather",
        }
    }

    /// Columns every extracted table of this kind must carry.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Zones => &[
                columns::TIMESTAMP,
                columns::ZONE_ID,
                columns::ZONE_NAME,
                columns::AIR_TEMP_C,
                columns::SETPOINT_C,
                columns::CO2_PPM,
                columns::RH_PCT,
            ],
            Self::Hvac => &[
                columns::TIMESTAMP,
                columns::AHU_ID,
                columns::SUPPLY_TEMP_C,
                columns::RETURN_TEMP_C,
                columns::POWER_KW,
                columns::COOLING_KW,
                columns::HEATING_KW,
            ],
            Self::Meters => &[
                columns::TIMESTAMP,
                columns::ELECTRIC_KWH,
                columns::HEATING_KWH,
                columns::COOLING_KWH,
            ],
            Self::Weather => &[
                columns::TIMESTAMP,
                columns::DRYBULB_C,
                columns::RELHUM_PCT,
                columns::GHI_W_M2,
            ],
        }
    }
}

impl fmt::Display for RawTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulation run: typed metadata plus its four raw reading tables.
///
/// Construction checks the run id and the presence of every required raw
/// column, so a malformed run is rejected before any builder touches it.
/// The record is immutable afterwards.
#[derive(Debug, Clone)]
pub struct RunRecord {
    run_id: String,
    metadata: RunMetadata,
    zones: DataFrame,
    hvac: DataFrame,
    meters: DataFrame,
    weather: DataFrame,
}

impl RunRecord {
    /// Create a run record from extracted tables.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyRunId`] for a blank run id and
    /// [`ModelError::MissingColumn`] for the first required column absent
    /// from any raw table.
    pub fn new(
        run_id: impl Into<String>,
        metadata: RunMetadata,
        zones: DataFrame,
        hvac: DataFrame,
        meters: DataFrame,
        weather: DataFrame,
    ) -> Result<Self> {
        let run_id = run_id.into().trim().to_string();
        if run_id.is_empty() {
            return Err(ModelError::EmptyRunId);
        }
        let record = Self {
            run_id,
            metadata,
            zones,
            hvac,
            meters,
            weather,
        };
        for table in RawTable::ALL {
            let frame = record.table(table);
            if let Some(column) = table
                .required_columns()
                .iter()
                .copied()
                .find(|column| frame.column(column).is_err())
            {
                return Err(ModelError::MissingColumn {
                    run_id: record.run_id.clone(),
                    table,
                    column,
                });
            }
        }
        Ok(record)
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    pub fn building_id(&self) -> &str {
        self.metadata.building_id()
    }

    pub fn scenario_id(&self) -> &str {
        self.metadata.scenario_id()
    }

    /// The raw table of the given kind.
    pub fn table(&self, table: RawTable) -> &DataFrame {
        match table {
            RawTable::Zones => &self.zones,
            RawTable::Hvac => &self.hvac,
            RawTable::Meters => &self.meters,
            RawTable::Weather => &self.weather,
        }
    }
}
