//! Domain types produced by the lookup pipeline and consumed by the presenter.
//!
//! Everything here is an immutable per-query snapshot: built when the user asks
//! for a city and dropped once it has been rendered.

use crate::error::LookupError;
use crate::models::{AirQualityIndex, CurrentConditions};
use chrono::{DateTime, FixedOffset};
use std::fmt;

/// Free-text city name entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    /// Trims the input and rejects it if nothing is left.
    pub fn new(input: &str) -> Result<Self, LookupError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque AccuWeather location identifier. Only meaningful to the provider that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current weather at a location, in metric units.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: f64,
    pub unit: String,
    pub condition: String,
    /// Relative humidity in percent.
    pub humidity: i32,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    pub uv_index: i32,
    pub observed_at: Option<DateTime<FixedOffset>>,
}

impl From<CurrentConditions> for WeatherReading {
    fn from(c: CurrentConditions) -> Self {
        Self {
            temperature: c.temperature.metric.value,
            unit: c.temperature.metric.unit,
            condition: c.weather_text,
            humidity: c.relative_humidity,
            wind_speed: c.wind.speed.metric.value,
            uv_index: c.uv_index,
            observed_at: c.local_observation_date_time,
        }
    }
}

/// Current air quality at a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirQualityReading {
    pub aqi: i32,
    pub category: String,
    pub description: String,
}

impl From<AirQualityIndex> for AirQualityReading {
    fn from(a: AirQualityIndex) -> Self {
        Self {
            aqi: a.aqi,
            category: a.category,
            description: a.description,
        }
    }
}

/// Everything one successful lookup produced.
///
/// Air quality keeps its own `Result`: a failure there does not stop the weather
/// from being shown, the presenter renders it as unavailable instead.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub city: CityQuery,
    pub location_key: LocationKey,
    pub weather: WeatherReading,
    pub air_quality: Result<AirQualityReading, LookupError>,
}

/// Visual cue attached to a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// UV exposure band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
}

impl UvLevel {
    /// Below 3 is low, 3 to 5 moderate, 6 and above high.
    pub fn from_index(uv_index: i32) -> Self {
        if uv_index < 3 {
            UvLevel::Low
        } else if uv_index < 6 {
            UvLevel::Moderate
        } else {
            UvLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UvLevel::Low => "Low",
            UvLevel::Moderate => "Moderate",
            UvLevel::High => "High",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            UvLevel::Low => Severity::Success,
            UvLevel::Moderate => Severity::Warning,
            UvLevel::High => Severity::Error,
        }
    }
}

/// Maps a provider AQI category label to its severity. Unknown labels are treated as errors.
pub fn aqi_category_severity(category: &str) -> Severity {
    match category {
        "Good" => Severity::Success,
        "Moderate" | "Unhealthy for sensitive groups" => Severity::Warning,
        _ => Severity::Error,
    }
}
