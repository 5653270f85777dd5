// Sensor reading domain model
use super::errors::DashboardError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column name of the timestamp in the tabular schema
pub const TIMESTAMP_COLUMN: &str = "DATETIMEDATA";

/// One timestamped multi-parameter record.
///
/// Field names follow the tabular schema so the same type serves CSV import,
/// CSV export and JSON payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "DATETIMEDATA", with = "iso_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "PM25")]
    pub pm25: f64,
    #[serde(rename = "PM10")]
    pub pm10: f64,
    #[serde(rename = "O3")]
    pub o3: f64,
    #[serde(rename = "NO2")]
    pub no2: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "WindSpeed")]
    pub wind_speed: f64,
}

impl Reading {
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Pm25 => self.pm25,
            Parameter::Pm10 => self.pm10,
            Parameter::O3 => self.o3,
            Parameter::No2 => self.no2,
            Parameter::Temperature => self.temperature,
            Parameter::Humidity => self.humidity,
            Parameter::WindSpeed => self.wind_speed,
        }
    }
}

/// Measured columns of the schema (everything except the timestamp)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Parameter {
    #[serde(rename = "PM25")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "NO2")]
    No2,
    Temperature,
    Humidity,
    WindSpeed,
}

impl Parameter {
    /// Schema order, used for dropdown options and the CSV header
    pub const ALL: [Parameter; 7] = [
        Parameter::Pm25,
        Parameter::Pm10,
        Parameter::O3,
        Parameter::No2,
        Parameter::Temperature,
        Parameter::Humidity,
        Parameter::WindSpeed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Pm25 => "PM25",
            Parameter::Pm10 => "PM10",
            Parameter::O3 => "O3",
            Parameter::No2 => "NO2",
            Parameter::Temperature => "Temperature",
            Parameter::Humidity => "Humidity",
            Parameter::WindSpeed => "WindSpeed",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parameter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Parameter::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| DashboardError::UnknownParameter(name.to_string()))
    }
}

/// Parse a timestamp as the data sources and date pickers produce it.
///
/// Accepts ISO-8601 with `T` or space separator and optional fractional
/// seconds, RFC 3339 with an offset (converted to UTC), or a bare date
/// (midnight).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

mod iso_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unparseable timestamp '{}'", raw)))
    }
}
