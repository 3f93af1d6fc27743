//! Dimension builders.
//!
//! Each builder folds the ordered run list into one deduplicated dimension
//! table. Building and scenario keep the first metadata seen for a natural
//! key; zone, AHU and time assign dense surrogate keys `1..=N` after sorting.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use polars::prelude::{Column, DataFrame};

use energy_common::datetime_column;
use energy_model::table::columns;
use energy_model::{RawTable, RunMetadata, RunRecord, TableName};

use crate::error::{Result, TransformError};
use crate::frame::{NaturalId, RunTable, build_frame};

/// Dense 1-based surrogate keys for `len` sorted rows.
fn surrogate_keys(len: usize) -> Vec<i64> {
    (1..).take(len).collect()
}

/// First-seen metadata per natural key, warning when later runs disagree.
fn first_seen<'a, K, F, D>(
    runs: &'a [RunRecord],
    key: K,
    differs: D,
) -> BTreeMap<&'a str, &'a RunMetadata>
where
    K: Fn(&'a RunMetadata) -> &'a str,
    D: Fn(&RunMetadata, &RunMetadata) -> Option<F>,
    F: std::fmt::Display,
{
    runs.iter().fold(BTreeMap::new(), |mut seen, run| {
        let metadata = run.metadata();
        match seen.entry(key(metadata)) {
            Entry::Vacant(slot) => {
                slot.insert(metadata);
            }
            Entry::Occupied(first) => {
                if let Some(field) = differs(*first.get(), metadata) {
                    tracing::warn!(
                        run_id = run.run_id(),
                        key = *first.key(),
                        %field,
                        "Run metadata differs from first-seen run; keeping first"
                    );
                }
            }
        }
        seen
    })
}

/// `dim_building`: one row per `building_id`, sorted by it.
pub fn build_dim_building(runs: &[RunRecord]) -> Result<DataFrame> {
    let buildings = first_seen(
        runs,
        RunMetadata::building_id,
        |first, later| {
            if first.building_name() != later.building_name() {
                Some(columns::BUILDING_NAME)
            } else if first.location() != later.location() {
                Some(columns::LOCATION)
            } else if first.floor_area_m2() != later.floor_area_m2() {
                Some(columns::FLOOR_AREA_M2)
            } else {
                None
            }
        },
    );

    let mut ids = Vec::with_capacity(buildings.len());
    let mut names = Vec::with_capacity(buildings.len());
    let mut locations = Vec::with_capacity(buildings.len());
    let mut areas = Vec::with_capacity(buildings.len());
    for (id, metadata) in buildings {
        ids.push(id);
        names.push(metadata.building_name());
        locations.push(metadata.location());
        areas.push(metadata.floor_area_m2());
    }

    build_frame(
        TableName::DimBuilding,
        vec![
            Column::new(columns::BUILDING_ID.into(), ids),
            Column::new(columns::BUILDING_NAME.into(), names),
            Column::new(columns::LOCATION.into(), locations),
            Column::new(columns::FLOOR_AREA_M2.into(), areas),
        ],
    )
}

/// `dim_scenario`: one row per `scenario_id`, sorted by it.
pub fn build_dim_scenario(runs: &[RunRecord]) -> Result<DataFrame> {
    let scenarios = first_seen(
        runs,
        RunMetadata::scenario_id,
        |first, later| {
            (first.scenario_description() != later.scenario_description())
                .then_some(columns::DESCRIPTION)
        },
    );

    let ids: Vec<&str> = scenarios.keys().copied().collect();
    let descriptions: Vec<String> = scenarios
        .values()
        .map(|metadata| metadata.scenario_description())
        .collect();

    build_frame(
        TableName::DimScenario,
        vec![
            Column::new(columns::SCENARIO_ID.into(), ids),
            Column::new(columns::DESCRIPTION.into(), descriptions),
        ],
    )
}

/// `dim_zone`: distinct `(building_id, zone_id, zone_name)` tuples.
///
/// Integer zone ids sort numerically; ids are stored as text.
///
/// The same zone id under two names stays as two rows with two keys.
pub fn build_dim_zone(runs: &[RunRecord]) -> Result<DataFrame> {
    let mut zones: BTreeSet<(String, NaturalId, Option<String>)> = BTreeSet::new();
    for run in runs {
        let raw = RunTable::new(run, RawTable::Zones);
        let ids = raw.keys(columns::ZONE_ID)?;
        let names = raw.texts(columns::ZONE_NAME)?;
        for (id, name) in ids.into_iter().zip(names) {
            zones.insert((run.building_id().to_string(), id, name));
        }
    }

    let mut buildings = Vec::with_capacity(zones.len());
    let mut ids = Vec::with_capacity(zones.len());
    let mut names = Vec::with_capacity(zones.len());
    for (building, id, name) in zones {
        buildings.push(building);
        ids.push(id.to_string());
        names.push(name);
    }

    build_frame(
        TableName::DimZone,
        vec![
            Column::new(columns::ZONE_KEY.into(), surrogate_keys(ids.len())),
            Column::new(columns::BUILDING_ID.into(), buildings),
            Column::new(columns::ZONE_ID.into(), ids),
            Column::new(columns::ZONE_NAME.into(), names),
        ],
    )
}

/// `dim_ahu`: distinct `(building_id, ahu_id)` pairs.
pub fn build_dim_ahu(runs: &[RunRecord]) -> Result<DataFrame> {
    let mut units: BTreeSet<(String, NaturalId)> = BTreeSet::new();
    for run in runs {
        let raw = RunTable::new(run, RawTable::Hvac);
        for id in raw.keys(columns::AHU_ID)? {
            units.insert((run.building_id().to_string(), id));
        }
    }

    let (buildings, ids): (Vec<String>, Vec<String>) = units
        .into_iter()
        .map(|(building, id)| (building, id.to_string()))
        .unzip();

    build_frame(
        TableName::DimAhu,
        vec![
            Column::new(columns::AHU_KEY.into(), surrogate_keys(ids.len())),
            Column::new(columns::BUILDING_ID.into(), buildings),
            Column::new(columns::AHU_ID.into(), ids),
        ],
    )
}

/// `dim_time`: every distinct zone-reading timestamp across all runs,
/// ascending, with calendar attributes.
pub fn build_dim_time(runs: &[RunRecord]) -> Result<DataFrame> {
    let mut instants: BTreeSet<NaiveDateTime> = BTreeSet::new();
    for run in runs {
        instants.extend(RunTable::new(run, RawTable::Zones).timestamps()?);
    }
    let instants: Vec<NaiveDateTime> = instants.into_iter().collect();

    let calendar =
        |f: fn(&NaiveDateTime) -> i32| -> Vec<i32> { instants.iter().map(f).collect() };
    let timestamp = datetime_column(columns::TIMESTAMP, &instants).map_err(|source| {
        TransformError::Polars {
            table: TableName::DimTime,
            source,
        }
    })?;

    build_frame(
        TableName::DimTime,
        vec![
            Column::new(columns::TIME_KEY.into(), surrogate_keys(instants.len())),
            timestamp,
            Column::new(columns::YEAR.into(), calendar(Datelike::year)),
            Column::new(columns::MONTH.into(), calendar(|ts| ts.month() as i32)),
            Column::new(columns::DAY.into(), calendar(|ts| ts.day() as i32)),
            Column::new(columns::HOUR.into(), calendar(|ts| ts.hour() as i32)),
            Column::new(columns::DOW.into(), calendar(day_of_week)),
            Column::new(
                columns::IS_WEEKEND.into(),
                instants.iter().map(is_weekend).collect::<Vec<bool>>(),
            ),
        ],
    )
}

/// Day of week with Monday as 0.
fn day_of_week(ts: &NaiveDateTime) -> i32 {
    ts.weekday().num_days_from_monday() as i32
}

fn is_weekend(ts: &NaiveDateTime) -> bool {
    matches!(ts.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surrogate_keys_are_dense() {
        assert_eq!(surrogate_keys(3), vec![1, 2, 3]);
        assert!(surrogate_keys(0).is_empty());
    }

    #[test]
    fn test_calendar_helpers() {
        let saturday = chrono::NaiveDate::from_ymd_opt(2024, 1, 6)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        assert_eq!(day_of_week(&saturday), 5);
        assert!(is_weekend(&saturday));
        let monday = saturday + chrono::Duration::days(2);
        assert_eq!(day_of_week(&monday), 0);
        assert!(!is_weekend(&monday));
    }
}
