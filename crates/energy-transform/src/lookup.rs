//! Natural-key to surrogate-key lookups read back from built dimensions.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use polars::prelude::{AnyValue, Column, DataFrame};

use energy_common::{any_to_datetime, any_to_i64, any_to_string};
use energy_model::TableName;
use energy_model::table::columns;

use crate::error::{Result, TransformError};

fn dimension_column<'a>(
    table: TableName,
    frame: &'a DataFrame,
    column: &'static str,
) -> Result<&'a Column> {
    frame
        .column(column)
        .map_err(|_| TransformError::DimensionContract { table, column })
}

fn cell<'a>(table: TableName, column: &'a Column, idx: usize) -> Result<AnyValue<'a>> {
    column
        .get(idx)
        .map_err(|source| TransformError::Polars { table, source })
}

/// `dim_time` timestamp to `time_key`.
#[derive(Debug, Default)]
pub(crate) struct TimeLookup {
    keys: HashMap<NaiveDateTime, i64>,
}

impl TimeLookup {
    pub(crate) fn from_dim_time(dim_time: &DataFrame) -> Result<Self> {
        let table = TableName::DimTime;
        let key_col = dimension_column(table, dim_time, columns::TIME_KEY)?;
        let ts_col = dimension_column(table, dim_time, columns::TIMESTAMP)?;

        let mut keys = HashMap::with_capacity(dim_time.height());
        for idx in 0..dim_time.height() {
            let key = any_to_i64(cell(table, key_col, idx)?);
            let timestamp = any_to_datetime(cell(table, ts_col, idx)?);
            if let (Some(key), Some(timestamp)) = (key, timestamp) {
                keys.insert(timestamp, key);
            }
        }
        Ok(Self { keys })
    }

    pub(crate) fn get(&self, timestamp: &NaiveDateTime) -> Option<i64> {
        self.keys.get(timestamp).copied()
    }
}

/// `(building_id, natural_id)` to every matching surrogate key.
///
/// One natural key maps to several surrogate keys when the dimension kept
/// rows that differ only in name.
#[derive(Debug, Default)]
pub(crate) struct EntityLookup {
    keys: HashMap<(String, String), Vec<i64>>,
}

impl EntityLookup {
    pub(crate) fn from_dim_zone(dim_zone: &DataFrame) -> Result<Self> {
        Self::from_dimension(TableName::DimZone, dim_zone, columns::ZONE_KEY, columns::ZONE_ID)
    }

    pub(crate) fn from_dim_ahu(dim_ahu: &DataFrame) -> Result<Self> {
        Self::from_dimension(TableName::DimAhu, dim_ahu, columns::AHU_KEY, columns::AHU_ID)
    }

    fn from_dimension(
        table: TableName,
        frame: &DataFrame,
        key_column: &'static str,
        id_column: &'static str,
    ) -> Result<Self> {
        let key_col = dimension_column(table, frame, key_column)?;
        let building_col = dimension_column(table, frame, columns::BUILDING_ID)?;
        let id_col = dimension_column(table, frame, id_column)?;

        let mut keys: HashMap<(String, String), Vec<i64>> = HashMap::new();
        for idx in 0..frame.height() {
            let Some(key) = any_to_i64(cell(table, key_col, idx)?) else {
                continue;
            };
            let building = any_to_string(cell(table, building_col, idx)?);
            let id = any_to_string(cell(table, id_col, idx)?);
            keys.entry((building, id)).or_default().push(key);
        }
        Ok(Self { keys })
    }

    /// Keys for one reading, in dimension order; a single `None` when unmatched.
    pub(crate) fn resolve(&self, building_id: &str, natural_id: &str) -> Vec<Option<i64>> {
        match self
            .keys
            .get(&(building_id.to_string(), natural_id.to_string()))
        {
            Some(keys) => keys.iter().copied().map(Some).collect(),
            None => vec![None],
        }
    }
}

/// Building ids of `dim_building`, in row order.
pub(crate) fn building_ids(dim_building: &DataFrame) -> Result<Vec<String>> {
    let table = TableName::DimBuilding;
    let id_col = dimension_column(table, dim_building, columns::BUILDING_ID)?;
    (0..dim_building.height())
        .map(|idx| cell(table, id_col, idx).map(any_to_string))
        .collect()
}
