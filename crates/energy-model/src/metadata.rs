//! Typed per-run metadata.
//!
//! Simulation exports ship a loosely typed `metadata.json` per run. It is
//! converted into [`RunMetadata`] once, at the boundary, so the builders only
//! ever see validated values.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// Metadata describing the building and scenario of one simulation run.
///
/// Only [`RunMetadata::from_json`] constructs it, so every instance has
/// passed the boundary checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetadata {
    building_id: String,
    building_name: String,
    location: String,
    floor_area_m2: f64,
    scenario_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl RunMetadata {
    pub const BUILDING_ID: &'static str = "building_id";
    pub const BUILDING_NAME: &'static str = "building_name";
    pub const LOCATION: &'static str = "location";
    pub const FLOOR_AREA_M2: &'static str = "floor_area_m2";
    pub const SCENARIO_ID: &'static str = "scenario_id";
    pub const DESCRIPTION: &'static str = "description";

    /// Convert a raw metadata document into typed metadata.
    ///
    /// Identifier and name fields accept JSON strings or numbers (numbers are
    /// rendered as text). `floor_area_m2` must be a finite number, either as a
    /// JSON number or a numeric string. `description` is optional; `null` is
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error naming `run_id` and the field when the document is not
    /// an object, a required field is missing or empty, or the floor area is
    /// not a finite number.
    pub fn from_json(run_id: &str, value: &Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(ModelError::MetadataNotObject {
                run_id: run_id.to_string(),
            });
        };

        let description = match object.get(Self::DESCRIPTION) {
            None | Some(Value::Null) => None,
            Some(_) => Some(required_text(run_id, object, Self::DESCRIPTION)?),
        };

        Ok(Self {
            building_id: required_text(run_id, object, Self::BUILDING_ID)?,
            building_name: required_text(run_id, object, Self::BUILDING_NAME)?,
            location: required_text(run_id, object, Self::LOCATION)?,
            floor_area_m2: required_number(run_id, object, Self::FLOOR_AREA_M2)?,
            scenario_id: required_text(run_id, object, Self::SCENARIO_ID)?,
            description,
        })
    }

    pub fn building_id(&self) -> &str {
        &self.building_id
    }

    pub fn building_name(&self) -> &str {
        &self.building_name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn floor_area_m2(&self) -> f64 {
        self.floor_area_m2
    }

    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    /// Free-text scenario description as given, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Scenario description, defaulting to `Scenario {scenario_id}`.
    pub fn scenario_description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Scenario {}", self.scenario_id))
    }
}

fn required_field<'a>(
    run_id: &str,
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ModelError::MissingMetadataField {
            run_id: run_id.to_string(),
            field,
        }),
        Some(value) => Ok(value),
    }
}

fn required_text(run_id: &str, object: &Map<String, Value>, field: &'static str) -> Result<String> {
    let text = match required_field(run_id, object, field)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(ModelError::InvalidMetadataField {
                run_id: run_id.to_string(),
                field,
                reason: format!("expected text, found {other}"),
            });
        }
    };
    if text.is_empty() {
        return Err(ModelError::InvalidMetadataField {
            run_id: run_id.to_string(),
            field,
            reason: "value is empty".to_string(),
        });
    }
    Ok(text)
}

fn required_number(run_id: &str, object: &Map<String, Value>, field: &'static str) -> Result<f64> {
    let value = required_field(run_id, object, field)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(ModelError::InvalidMetadataField {
            run_id: run_id.to_string(),
            field,
            reason: format!("expected a finite number, found {value}"),
        }),
    }
}
