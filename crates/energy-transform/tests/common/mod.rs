//! Run fixtures shared by the transform tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use energy_common::{any_to_datetime, any_to_f64, any_to_i64, any_to_string};
use energy_model::{RunMetadata, RunRecord};
use polars::prelude::*;
use serde_json::json;

pub fn metadata(building: &str, name: &str, scenario: &str) -> RunMetadata {
    RunMetadata::from_json(
        &format!("run_{building}_{scenario}"),
        &json!({
            "building_id": building,
            "building_name": name,
            "location": "Stockholm",
            "floor_area_m2": 5000.0,
            "scenario_id": scenario,
        }),
    )
    .expect("metadata")
}

/// Zone readings: `(timestamp, zone_id, zone_name, air_temp_C)`.
pub fn zones(rows: &[(&str, &str, &str, f64)]) -> DataFrame {
    df![
        "timestamp" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "zone_id" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        "zone_name" => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        "air_temp_C" => rows.iter().map(|r| r.3).collect::<Vec<_>>(),
        "setpoint_C" => vec![21.0; rows.len()],
        "co2_ppm" => vec![650.0; rows.len()],
        "rh_pct" => vec![40.0; rows.len()],
    ]
    .expect("zones frame")
}

/// HVAC readings: `(timestamp, ahu_id, power_kw, heating_kw, cooling_kw)`.
pub fn hvac(rows: &[(&str, &str, f64, f64, f64)]) -> DataFrame {
    df![
        "timestamp" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "ahu_id" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        "supply_temp_C" => vec![16.0; rows.len()],
        "return_temp_C" => vec![22.0; rows.len()],
        "power_kw" => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        "cooling_kw" => rows.iter().map(|r| r.4).collect::<Vec<_>>(),
        "heating_kw" => rows.iter().map(|r| r.3).collect::<Vec<_>>(),
    ]
    .expect("hvac frame")
}

/// Meter readings: `(timestamp, electric_kwh, heating_kwh, cooling_kwh)`.
pub fn meters(rows: &[(&str, f64, f64, f64)]) -> DataFrame {
    df![
        "timestamp" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "electric_kwh" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        "heating_kwh" => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        "cooling_kwh" => rows.iter().map(|r| r.3).collect::<Vec<_>>(),
    ]
    .expect("meters frame")
}

/// Weather readings: `(timestamp, drybulb_C)`.
pub fn weather(rows: &[(&str, f64)]) -> DataFrame {
    df![
        "timestamp" => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "drybulb_C" => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        "relhum_pct" => vec![55.0; rows.len()],
        "ghi_W_m2" => vec![120.0; rows.len()],
    ]
    .expect("weather frame")
}

/// A run with one zone `Z1` and one `AHU1` reporting at every timestamp.
pub fn simple_run(building: &str, scenario: &str, timestamps: &[&str]) -> RunRecord {
    let zone_rows: Vec<_> = timestamps.iter().map(|ts| (*ts, "Z1", "Office", 21.5)).collect();
    let hvac_rows: Vec<_> = timestamps.iter().map(|ts| (*ts, "AHU1", 4.0, 6.0, 2.0)).collect();
    let meter_rows: Vec<_> = timestamps.iter().map(|ts| (*ts, 30.0, 20.0, 10.0)).collect();
    let weather_rows: Vec<_> = timestamps.iter().map(|ts| (*ts, 2.5)).collect();
    run_with(
        metadata(building, "Office Tower", scenario),
        zones(&zone_rows),
        hvac(&hvac_rows),
        meters(&meter_rows),
        weather(&weather_rows),
    )
}

pub fn run_with(
    metadata: RunMetadata,
    zones: DataFrame,
    hvac: DataFrame,
    meters: DataFrame,
    weather: DataFrame,
) -> RunRecord {
    let run_id = format!("run_{}_{}", metadata.building_id(), metadata.scenario_id());
    RunRecord::new(run_id, metadata, zones, hvac, meters, weather).expect("run record")
}

fn cells(df: &DataFrame, name: &str) -> Vec<AnyValue<'static>> {
    let column = df.column(name).expect("column");
    (0..df.height())
        .map(|idx| column.get(idx).expect("cell").into_static())
        .collect()
}

pub fn ints(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    cells(df, name).into_iter().map(any_to_i64).collect()
}

pub fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    cells(df, name).into_iter().map(any_to_f64).collect()
}

pub fn strings(df: &DataFrame, name: &str) -> Vec<String> {
    cells(df, name).into_iter().map(any_to_string).collect()
}

pub fn timestamps(df: &DataFrame, name: &str) -> Vec<String> {
    let column = df.column(name).expect("column");
    (0..df.height())
        .map(|idx| {
            any_to_datetime(column.get(idx).expect("cell"))
                .map(|ts| ts.to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Run `f` with a subscriber recording WARN and above, returning its output.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || LogSink(Arc::clone(&sink)))
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.lock().expect("log buffer").clone();
    (value, String::from_utf8_lossy(&bytes).into_owned())
}

struct LogSink(Arc<Mutex<Vec<u8>>>);

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
