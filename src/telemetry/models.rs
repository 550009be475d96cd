use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::aggregation::ParameterType;

/// Keys under which providers have been seen to put the sample time.
const TIMESTAMP_KEYS: &[&str] = &["datahora", "data_hora", "timestamp", "datetime", "date"];

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Numbers arrive either as JSON numbers or as text, sometimes with a
/// decimal comma ("5,34").
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => parse_number(s),
        }
    }

    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Parse a provider number. Non-finite results are rejected.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

/// Entry of the station directory: `{ code: { name, latitude, longitude, river } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "lat", deserialize_with = "coordinate")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon", deserialize_with = "coordinate")]
    pub longitude: f64,
    #[serde(default, alias = "rio", alias = "river_name")]
    pub river: String,
}

fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = NumberOrText::deserialize(deserializer)?;
    raw.as_f64()
        .ok_or_else(|| serde::de::Error::custom("coordinate is not a number"))
}

/// Values computed for a station, one slot per parameter type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct StationMetrics {
    pub accumulated_rain: Option<f64>,
    pub instant_rain: Option<f64>,
    pub landslide_rain: Option<f64>,
    pub river_level: Option<f64>,
    pub temperature: Option<f64>,
}

impl StationMetrics {
    #[must_use]
    pub fn get(&self, parameter: ParameterType) -> Option<f64> {
        match parameter {
            ParameterType::AccumulatedRain => self.accumulated_rain,
            ParameterType::InstantRain => self.instant_rain,
            ParameterType::LandslideRain => self.landslide_rain,
            ParameterType::RiverLevel => self.river_level,
            ParameterType::Temperature => self.temperature,
        }
    }

    pub fn set(&mut self, parameter: ParameterType, value: f64) {
        let slot = match parameter {
            ParameterType::AccumulatedRain => &mut self.accumulated_rain,
            ParameterType::InstantRain => &mut self.instant_rain,
            ParameterType::LandslideRain => &mut self.landslide_rain,
            ParameterType::RiverLevel => &mut self.river_level,
            ParameterType::Temperature => &mut self.temperature,
        };
        *slot = Some(value);
    }
}

/// A monitoring station as shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub metrics: StationMetrics,
}

impl Station {
    #[must_use]
    pub fn from_directory(code: impl Into<String>, entry: DirectoryEntry) -> Self {
        Self {
            id: code.into(),
            name: entry.name,
            latitude: entry.latitude,
            longitude: entry.longitude,
            description: entry.river,
            metrics: StationMetrics::default(),
        }
    }
}

/// One raw telemetry sample. Field presence varies by station and sensor.
#[derive(Debug, Clone, Default)]
pub struct Reading {
    pub timestamp: Option<NaiveDateTime>,
    pub fields: serde_json::Map<String, Value>,
}

impl Reading {
    /// Build a reading from one element of a telemetry response.
    /// Non-object elements are not readings.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };
        let timestamp = TIMESTAMP_KEYS
            .iter()
            .find_map(|key| fields.remove(*key))
            .and_then(|v| parse_timestamp(&v));
        Some(Self { timestamp, fields })
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Numeric value of a field, or `None` when absent, null or non-numeric.
    #[must_use]
    pub fn numeric(&self, name: &str) -> Option<f64> {
        match self.fields.get(name)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => parse_number(s),
            _ => None,
        }
    }
}

fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            TIMESTAMP_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .or_else(|| {
                    DateTime::parse_from_rfc3339(s)
                        .ok()
                        .map(|dt| dt.naive_local())
                })
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

/// Alarm row as delivered by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AlarmRecord {
    #[serde(alias = "estacao")]
    pub station: String,
    #[serde(alias = "hora")]
    pub time: String,
    #[serde(alias = "valor")]
    value: NumberOrText,
    #[serde(default, alias = "msg", alias = "mensagem")]
    pub message: String,
}

impl AlarmRecord {
    #[must_use]
    pub fn value_text(&self) -> String {
        self.value.clone().into_text()
    }
}
