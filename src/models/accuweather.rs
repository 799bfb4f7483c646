//! Deserialization targets for the AccuWeather API responses.
//!
//! Only the fields the dashboard reads are modelled; serde ignores the rest of
//! the (large) provider payloads. Field names follow the provider's PascalCase,
//! except the AQI index which is served in lowercase.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Country block attached to every search result.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryRef {
    /// ISO 3166 alpha-2 code, e.g. "NG".
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub localized_name: Option<String>,
}

/// One entry of the `/locations/v1/search` result list.
///
/// Everything is optional: entries missing a field are skipped by the country
/// filter instead of failing the whole list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchLocation {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub country: Option<CountryRef>,
}

impl SearchLocation {
    pub fn country_id(&self) -> Option<&str> {
        self.country.as_ref().and_then(|c| c.id.as_deref())
    }
}

/// A value with its unit, as used for temperature and wind speed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitValue {
    pub value: f64,
    pub unit: String,
}

/// Metric and imperial renditions of the same measurement.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricImperial {
    pub metric: UnitValue,
    #[serde(default)]
    pub imperial: Option<UnitValue>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wind {
    pub speed: MetricImperial,
}

/// One entry of the `/currentconditions/v1/{key}?details=true` result list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentConditions {
    #[serde(default)]
    pub local_observation_date_time: Option<DateTime<FixedOffset>>,
    pub weather_text: String,
    pub temperature: MetricImperial,
    pub relative_humidity: i32,
    pub wind: Wind,
    #[serde(rename = "UVIndex")]
    pub uv_index: i32,
}

/// One entry of the `/indices/v1/currentconditions/aqi/{key}` result list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AirQualityIndex {
    pub aqi: i32,
    pub category: String,
    pub description: String,
}
