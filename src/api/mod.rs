//! Provides clients and utilities for interacting with external APIs.
//!
//! Includes:
//! - `accuweather`: Client for the AccuWeather location, conditions and AQI endpoints.

mod accuweather;

pub use accuweather::*;
