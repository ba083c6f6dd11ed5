//! Snapshot model: the scanner/target state document polled from the
//! estimation backend.
//!
//! Decoding is deliberately forgiving. A body that is not a JSON object is an
//! error, but inside the object every field degrades to "absent" on its own:
//! an undecodable scanner entry is dropped, a non-numeric RSSI or distance
//! becomes `None`, and a malformed `target` or `config` block becomes `None`.
//! The renderer never sees a half-parsed document.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::camera::Point;

/// Errors produced when decoding a snapshot body.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The body is not valid JSON.
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is valid JSON but not an object.
    #[error("snapshot must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// A fixed station reporting a distance estimate to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scanner {
    /// Opaque identifier, used only as the marker label.
    pub id: String,
    /// World position in meters.
    pub position: Point,
    /// Smoothed signal strength in dBm.
    #[serde(default, deserialize_with = "lenient")]
    pub last_rssi: Option<f64>,
    /// Estimated distance to the target in meters. Gates the range circle.
    #[serde(default, deserialize_with = "lenient")]
    pub estimated_distance: Option<f64>,
    /// Backend timestamp of the last reading, forwarded untouched.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<f64>,
    /// Seconds since the last reading, forwarded untouched.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub age_seconds: Option<f64>,
}

/// The current best position estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub position: Point,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub age_seconds: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub calculated_at: Option<f64>,
}

/// Estimation parameters echoed by the backend. Not read by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    pub rssi_at_1m: f64,
    pub path_loss_n: f64,
    pub smoothing_window: u32,
}

/// One complete state document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient_list")]
    pub scanners: Vec<Scanner>,
    #[serde(default, deserialize_with = "lenient")]
    pub target: Option<Target>,
    #[serde(default, deserialize_with = "lenient")]
    pub config: Option<FusionConfig>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub scanners_count: Option<u64>,
}

impl Snapshot {
    /// Decode a snapshot from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the body is not JSON or not an object.
    pub fn from_json(body: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Decode a snapshot from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NotAnObject`] for non-object values.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SnapshotError> {
        if !value.is_object() {
            return Err(SnapshotError::NotAnObject(json_kind(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Target position, if an estimate exists.
    #[must_use]
    pub fn target_position(&self) -> Option<Point> {
        self.target.as_ref().map(|t| t.position)
    }
}

/// Decode `T` from whatever JSON is present, treating anything that does not
/// fit as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(decode_or_absent(value))
}

/// Decode a list, dropping entries that do not fit. A non-list is empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(decode_or_absent)
        .collect())
}

fn decode_or_absent<T: DeserializeOwned>(value: serde_json::Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            debug!("treating undecodable {} as absent: {e}", short_type_name::<T>());
            None
        }
    }
}

/// Last path segment of `T`'s name, e.g. `Scanner` or `f64`.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
