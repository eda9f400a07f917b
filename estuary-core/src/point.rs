use crate::error::FetchError;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// An abundance value as the endpoint reports it.
///
/// Numbers keep their JSON textual form so `5` renders as `5` and not `5.0`.
/// Anything else (booleans, objects) is kept as raw JSON.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(serde_json::Number),
    Text(String),
    Other(Value),
}

impl Measurement {
    /// Numeric value, if there is one. Numeric strings count.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Measurement::Number(n) => n.as_f64(),
            Measurement::Text(s) => s.trim().parse::<f64>().ok(),
            Measurement::Other(_) => None,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Number(n) => write!(f, "{}", n),
            Measurement::Text(s) => f.write_str(s),
            Measurement::Other(v) => write!(f, "{}", v),
        }
    }
}

/// One microplastics observation at a sampling station.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(default)]
    pub station_code: Option<String>,
    #[serde(default)]
    pub water_abundance: Option<Measurement>,
    #[serde(default)]
    pub sediment_abundance: Option<Measurement>,
    #[serde(default)]
    pub sample_date: Option<String>,
    #[serde(default, deserialize_with = "coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "coordinate")]
    pub longitude: Option<f64>,
}

impl PointRecord {
    /// `(latitude, longitude)` when both are present, finite and in range.
    pub fn position(&self) -> Option<(f64, f64)> {
        let lat = self.latitude?;
        let lng = self.longitude?;
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some((lat, lng))
    }
}

/// Coordinates come from a `Numeric` column and may be serialized as strings.
/// A value that is not a number (`""`, `"north"`, `true`) becomes `None`, so
/// only that record is skipped.
fn coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(v)) => Some(v),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}

/// Parse an endpoint response body into point records, order as received.
///
/// Accepts a bare array, an object carrying a `points` array, or the
/// backend's `{"error": ...}` answer for an estuary with no points (which
/// yields an empty list).
pub fn parse_points(body: &str) -> Result<Vec<PointRecord>, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(mut map) => {
            if let Some(points) = map.remove("points") {
                return Ok(serde_json::from_value(points)?);
            }
            if let Some(message) = map.get("error") {
                warn!("Endpoint reported no data: {}", message);
                return Ok(Vec::new());
            }
            Err(FetchError::Parse(
                "object payload without 'points' or 'error'".to_string(),
            ))
        }
        other => Err(FetchError::Parse(format!(
            "expected an array of points, got {}",
            other
        ))),
    }
}
