//! Tests for dimension and fact builders and schema assembly.

mod common;

use std::collections::HashSet;

use common::{floats, hvac, ints, meters, metadata, run_with, simple_run, strings, timestamps, weather, zones};
use energy_model::{RawTable, StarSchema, TableName, TransformOptions};
use energy_transform::{
    TransformError, build_dim_building, build_dim_scenario, build_dim_time, build_dim_zone,
    build_fact_meters, build_star_schema,
};
use polars::prelude::*;

const T1: &str = "2024-01-01 00:00:00";
const T2: &str = "2024-01-01 01:00:00";

fn table<'a>(schema: &'a StarSchema, name: TableName) -> &'a DataFrame {
    schema.get(name).expect("table present")
}

fn assemble(runs: &[energy_model::RunRecord]) -> StarSchema {
    build_star_schema(runs, &TransformOptions::default()).expect("schema")
}

#[test]
fn two_scenarios_one_building() {
    let runs = vec![
        simple_run("B001", "BASE", &[T1, T2]),
        simple_run("B001", "RETROFIT", &[T1, T2]),
    ];
    let schema = assemble(&runs);

    assert!(schema.is_complete());
    assert_eq!(table(&schema, TableName::DimBuilding).height(), 1);
    assert_eq!(table(&schema, TableName::DimScenario).height(), 2);

    let dim_zone = table(&schema, TableName::DimZone);
    assert_eq!(dim_zone.height(), 1);
    assert_eq!(ints(dim_zone, "zone_key"), vec![Some(1)]);

    assert_eq!(table(&schema, TableName::FactZoneConditions).height(), 4);
    assert_eq!(table(&schema, TableName::FactHvac).height(), 4);
    assert_eq!(table(&schema, TableName::FactMeters).height(), 4);

    let fact_weather = table(&schema, TableName::FactWeather);
    assert_eq!(fact_weather.height(), 2);
    assert_eq!(ints(fact_weather, "time_key"), vec![Some(1), Some(2)]);
    assert_eq!(strings(fact_weather, "building_id"), vec!["B001", "B001"]);
}

#[test]
fn tables_follow_catalog_columns() {
    let schema = assemble(&[simple_run("B001", "BASE", &[T1])]);
    for (name, frame) in schema.iter() {
        let actual: Vec<&str> = frame.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(actual, name.columns(), "{name}");
    }
}

#[test]
fn low_power_cop_proxy_is_null() {
    let run = run_with(
        metadata("B001", "Office Tower", "BASE"),
        zones(&[(T1, "Z1", "Office", 21.0), (T2, "Z1", "Office", 21.0)]),
        hvac(&[(T1, "AHU1", 0.5, 2.0, 1.0), (T2, "AHU1", 2.0, 3.0, 1.0)]),
        meters(&[(T1, 1.0, 1.0, 1.0)]),
        weather(&[(T1, 0.0)]),
    );
    let schema = assemble(&[run]);
    let fact_hvac = table(&schema, TableName::FactHvac);
    assert_eq!(floats(fact_hvac, "cop_proxy"), vec![None, Some(2.0)]);
}

#[test]
fn cop_threshold_is_configurable() {
    let run = run_with(
        metadata("B001", "Office Tower", "BASE"),
        zones(&[(T1, "Z1", "Office", 21.0)]),
        hvac(&[(T1, "AHU1", 0.5, 2.0, 1.0)]),
        meters(&[(T1, 1.0, 1.0, 1.0)]),
        weather(&[(T1, 0.0)]),
    );
    let options = TransformOptions::default().with_cop_min_power_kw(0.25);
    let schema = build_star_schema(&[run], &options).unwrap();
    assert_eq!(floats(table(&schema, TableName::FactHvac), "cop_proxy"), vec![Some(6.0)]);
}

#[test]
fn dim_time_is_sorted_union_with_calendar() {
    // 2024-01-06 is a Saturday.
    let runs = vec![
        simple_run("B001", "BASE", &["2024-01-06 23:00:00", "2024-01-07 00:00:00"]),
        simple_run("B002", "BASE", &["2024-01-06 22:00:00", "2024-01-06 23:00:00"]),
    ];
    let dim_time = build_dim_time(&runs).unwrap();

    assert_eq!(ints(&dim_time, "time_key"), vec![Some(1), Some(2), Some(3)]);
    assert_eq!(
        timestamps(&dim_time, "timestamp"),
        vec!["2024-01-06 22:00:00", "2024-01-06 23:00:00", "2024-01-07 00:00:00"]
    );
    assert_eq!(ints(&dim_time, "hour"), vec![Some(22), Some(23), Some(0)]);
    assert_eq!(ints(&dim_time, "dow"), vec![Some(5), Some(5), Some(6)]);
    assert_eq!(ints(&dim_time, "day"), vec![Some(6), Some(6), Some(7)]);
    assert_eq!(strings(&dim_time, "is_weekend"), vec!["true", "true", "true"]);
}

#[test]
fn building_dimension_is_sorted_and_first_seen_wins() {
    let later = run_with(
        metadata("B001", "Renamed Tower", "RETROFIT"),
        zones(&[(T1, "Z1", "Office", 21.0)]),
        hvac(&[(T1, "AHU1", 2.0, 1.0, 1.0)]),
        meters(&[(T1, 1.0, 1.0, 1.0)]),
        weather(&[(T1, 0.0)]),
    );
    let runs = vec![
        simple_run("B002", "BASE", &[T1]),
        simple_run("B001", "BASE", &[T1]),
        later,
    ];
    let dim_building = build_dim_building(&runs).unwrap();
    assert_eq!(strings(&dim_building, "building_id"), vec!["B001", "B002"]);
    assert_eq!(strings(&dim_building, "building_name"), vec!["Office Tower", "Office Tower"]);

    let dim_scenario = build_dim_scenario(&runs).unwrap();
    assert_eq!(strings(&dim_scenario, "scenario_id"), vec!["BASE", "RETROFIT"]);
    assert_eq!(
        strings(&dim_scenario, "description"),
        vec!["Scenario BASE", "Scenario RETROFIT"]
    );
}

#[test]
fn weather_fans_out_first_run_per_building() {
    let first = run_with(
        metadata("B002", "Annex", "BASE"),
        zones(&[(T1, "Z1", "Lobby", 20.0)]),
        hvac(&[(T1, "AHU1", 2.0, 1.0, 1.0)]),
        meters(&[(T1, 1.0, 1.0, 1.0)]),
        weather(&[(T1, -4.0), (T2, -5.0)]),
    );
    let runs = vec![first, simple_run("B001", "BASE", &[T1, T2])];
    let schema = assemble(&runs);
    let fact_weather = table(&schema, TableName::FactWeather);

    assert_eq!(
        strings(fact_weather, "building_id"),
        vec!["B001", "B001", "B002", "B002"]
    );
    assert_eq!(
        floats(fact_weather, "drybulb_C"),
        vec![Some(-4.0), Some(-5.0), Some(-4.0), Some(-5.0)]
    );
}

#[test]
fn renamed_zone_keeps_both_rows_and_joins_both() {
    let renamed = run_with(
        metadata("B001", "Office Tower", "RETROFIT"),
        zones(&[(T1, "Z1", "Open Office", 22.0)]),
        hvac(&[(T1, "AHU1", 2.0, 1.0, 1.0)]),
        meters(&[(T1, 1.0, 1.0, 1.0)]),
        weather(&[(T1, 0.0)]),
    );
    let runs = vec![simple_run("B001", "BASE", &[T1]), renamed];

    let dim_zone = build_dim_zone(&runs).unwrap();
    assert_eq!(ints(&dim_zone, "zone_key"), vec![Some(1), Some(2)]);
    assert_eq!(strings(&dim_zone, "zone_name"), vec!["Office", "Open Office"]);

    let schema = assemble(&runs);
    let facts = table(&schema, TableName::FactZoneConditions);
    assert_eq!(facts.height(), 4);
    assert_eq!(
        ints(facts, "zone_key"),
        vec![Some(1), Some(2), Some(1), Some(2)]
    );
}

#[test]
fn unresolved_time_becomes_null_key() {
    let run = run_with(
        metadata("B001", "Office Tower", "BASE"),
        zones(&[(T1, "Z1", "Office", 21.0)]),
        hvac(&[(T1, "AHU1", 2.0, 1.0, 1.0), (T2, "AHU1", 2.0, 1.0, 1.0)]),
        meters(&[(T2, 1.0, 1.0, 1.0)]),
        weather(&[(T1, 0.0)]),
    );
    let schema = assemble(&[run]);
    assert_eq!(ints(table(&schema, TableName::FactHvac), "time_key"), vec![Some(1), None]);
    assert_eq!(ints(table(&schema, TableName::FactMeters), "time_key"), vec![None]);
}

#[test]
fn fact_grains_are_unique() {
    let runs = vec![
        simple_run("B001", "BASE", &[T1, T2]),
        simple_run("B001", "RETROFIT", &[T1, T2]),
        simple_run("B002", "BASE", &[T2]),
    ];
    let schema = assemble(&runs);
    for name in TableName::FACTS {
        let frame = table(&schema, name);
        let grain: Vec<Vec<String>> = name.grain().iter().map(|col| strings(frame, col)).collect();
        let tuples: HashSet<Vec<&str>> = (0..frame.height())
            .map(|row| grain.iter().map(|values| values[row].as_str()).collect())
            .collect();
        assert_eq!(tuples.len(), frame.height(), "{name}");
    }
}

#[test]
fn empty_input_yields_empty_tables() {
    let schema = assemble(&[]);
    assert!(schema.is_complete());
    for (name, frame) in schema.iter() {
        assert_eq!(frame.height(), 0, "{name}");
        assert_eq!(frame.width(), name.columns().len(), "{name}");
    }
}

#[test]
fn assembly_is_deterministic() {
    let runs = vec![
        simple_run("B002", "BASE", &[T2, T1]),
        simple_run("B001", "RETROFIT", &[T1]),
    ];
    let first = assemble(&runs);
    let second = assemble(&runs);
    for (name, frame) in first.iter() {
        assert!(frame.equals_missing(table(&second, name)), "{name}");
    }
}

#[test]
fn invalid_timestamp_names_run_and_row() {
    let run = run_with(
        metadata("B001", "Office Tower", "BASE"),
        zones(&[(T1, "Z1", "Office", 21.0), ("yesterday", "Z1", "Office", 21.0)]),
        hvac(&[(T1, "AHU1", 2.0, 1.0, 1.0)]),
        meters(&[(T1, 1.0, 1.0, 1.0)]),
        weather(&[(T1, 0.0)]),
    );
    let err = build_star_schema(&[run], &TransformOptions::default()).unwrap_err();
    match err {
        TransformError::InvalidTimestamp {
            run_id,
            table,
            row,
            value,
        } => {
            assert_eq!(run_id, "run_B001_BASE");
            assert_eq!(table, RawTable::Zones);
            assert_eq!(row, 1);
            assert_eq!(value, "yesterday");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn null_zone_id_is_rejected() {
    let zones = df![
        "timestamp" => [T1, T2],
        "zone_id" => [Some("Z1"), None],
        "zone_name" => ["Office", "Office"],
        "air_temp_C" => [21.0, 21.0],
        "setpoint_C" => [21.0, 21.0],
        "co2_ppm" => [600.0, 600.0],
        "rh_pct" => [40.0, 40.0],
    ]
    .unwrap();
    let run = run_with(
        metadata("B001", "Office Tower", "BASE"),
        zones,
        hvac(&[(T1, "AHU1", 2.0, 1.0, 1.0)]),
        meters(&[(T1, 1.0, 1.0, 1.0)]),
        weather(&[(T1, 0.0)]),
    );
    let err = build_dim_zone(&[run]).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"run run_B001_BASE: zones row 1 has a null zone_id");
}

#[test]
fn facts_require_built_dimensions() {
    let runs = vec![simple_run("B001", "BASE", &[T1])];
    let bare_time = df!["timestamp" => [T1]].unwrap();
    let err = build_fact_meters(&runs, &bare_time).unwrap_err();
    assert!(matches!(
        err,
        TransformError::DimensionContract {
            table: TableName::DimTime,
            column: "time_key"
        }
    ));
}

#[test]
fn integer_ids_get_keys_in_numeric_order() {
    let zones = df![
        "timestamp" => [T1, T1, T1],
        "zone_id" => [2i64, 10, 1],
        "zone_name" => ["Two", "Ten", "One"],
        "air_temp_C" => [21.0, 21.0, 21.0],
        "setpoint_C" => [21.0, 21.0, 21.0],
        "co2_ppm" => [600.0, 600.0, 600.0],
        "rh_pct" => [40.0, 40.0, 40.0],
    ]
    .unwrap();
    let hvac = df![
        "timestamp" => [T1, T1],
        "ahu_id" => [9i32, 12],
        "supply_temp_C" => [16.0, 16.0],
        "return_temp_C" => [22.0, 22.0],
        "power_kw" => [2.0, 2.0],
        "cooling_kw" => [1.0, 1.0],
        "heating_kw" => [1.0, 1.0],
    ]
    .unwrap();
    let run = run_with(
        metadata("B001", "Office Tower", "BASE"),
        zones,
        hvac,
        meters(&[(T1, 1.0, 1.0, 1.0)]),
        weather(&[(T1, 0.0)]),
    );
    let schema = assemble(&[run]);

    let dim_zone = table(&schema, TableName::DimZone);
    assert_eq!(ints(dim_zone, "zone_key"), vec![Some(1), Some(2), Some(3)]);
    assert_eq!(strings(dim_zone, "zone_id"), vec!["1", "2", "10"]);
    assert_eq!(
        ints(table(&schema, TableName::FactZoneConditions), "zone_key"),
        vec![Some(2), Some(3), Some(1)]
    );

    let dim_ahu = table(&schema, TableName::DimAhu);
    assert_eq!(strings(dim_ahu, "ahu_id"), vec!["9", "12"]);
    assert_eq!(
        ints(table(&schema, TableName::FactHvac), "ahu_key"),
        vec![Some(1), Some(2)]
    );
}

#[test]
fn divergent_metadata_is_logged_and_first_kept() {
    let renamed = run_with(
        metadata("B001", "Renamed Tower", "RETROFIT"),
        zones(&[(T1, "Z1", "Office", 21.0)]),
        hvac(&[(T1, "AHU1", 2.0, 1.0, 1.0)]),
        meters(&[(T1, 1.0, 1.0, 1.0)]),
        weather(&[(T1, 0.0)]),
    );
    let runs = vec![simple_run("B001", "BASE", &[T1]), renamed];

    let (dim_building, logs) = common::capture_logs(|| build_dim_building(&runs).unwrap());
    assert_eq!(strings(&dim_building, "building_name"), vec!["Office Tower"]);
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("Run metadata differs from first-seen run"), "{logs}");
    assert!(logs.contains("run_B001_RETROFIT"), "{logs}");
    assert!(logs.contains("building_name"), "{logs}");

    let (_, quiet) = common::capture_logs(|| build_dim_scenario(&runs).unwrap());
    assert!(quiet.is_empty(), "{quiet}");
}
