//! Provides a client for the three AccuWeather endpoints the dashboard uses:
//! location search, current conditions and the air-quality index.
//!
//! Each call is a single GET with a fixed timeout. Nothing is retried; a failed
//! call is reported once, tagged with the `Stage` it happened in.

use crate::error::{LookupError, Result, Stage};
use crate::models::{AirQualityIndex, CurrentConditions, LocationKey, SearchLocation};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

pub const DEFAULT_BASE_URL: &str = "http://dataservice.accuweather.com";

/// Every provider call gives up after this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// An asynchronous client for the AccuWeather API.
pub struct AccuWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AccuWeatherClient {
    /// Creates a client against `base_url` (no trailing slash needed).
    ///
    /// Fails only if the underlying HTTP client cannot be built.
    pub fn new(api_key: String, base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Searches for locations matching `query`, hinting the provider with `country`.
    ///
    /// Corresponds to `/locations/v1/search`. The provider may still return
    /// places from other countries; filtering is left to the caller.
    pub async fn search_locations(
        &self,
        query: &str,
        country: &str,
    ) -> std::result::Result<Vec<SearchLocation>, LookupError> {
        let url = format!("{}/locations/v1/search", self.base_url);
        self.get_json(
            Stage::Search,
            &url,
            &[("q", query), ("country", country)],
        )
        .await
    }

    /// Fetches detailed current conditions. Corresponds to `/currentconditions/v1/{key}`.
    pub async fn current_conditions(
        &self,
        key: &LocationKey,
    ) -> std::result::Result<Vec<CurrentConditions>, LookupError> {
        let url = format!("{}/currentconditions/v1/{}", self.base_url, key);
        self.get_json(Stage::Weather, &url, &[("details", "true")])
            .await
    }

    /// Fetches the current air-quality index. Corresponds to `/indices/v1/currentconditions/aqi/{key}`.
    pub async fn air_quality(
        &self,
        key: &LocationKey,
    ) -> std::result::Result<Vec<AirQualityIndex>, LookupError> {
        let url = format!("{}/indices/v1/currentconditions/aqi/{}", self.base_url, key);
        self.get_json(Stage::AirQuality, &url, &[]).await
    }

    /// Sends one GET with the API key attached and decodes the JSON body into `T`.
    ///
    /// `url` carries no query string; the key only ever travels in the request itself,
    /// never in logs or errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        stage: Stage,
        url: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<T, LookupError> {
        debug!("GET {} ({})", url, stage);

        let response = self
            .client
            .get(url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                let err = LookupError::transport(stage, e);
                error!("Error calling {}: {}", url, err);
                err
            })?;

        // Check HTTP status code and handle potential API errors
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                let status = e.status();
                let err = LookupError::transport(stage, e);
                error!(
                    "{} returned status {}: {}",
                    url,
                    status.unwrap_or_default(),
                    err
                );
                if status == Some(reqwest::StatusCode::UNAUTHORIZED)
                    || status == Some(reqwest::StatusCode::FORBIDDEN)
                {
                    error!("Received 401/403. Check ACCUWEATHER_API_KEY validity and permissions.");
                } else if status == Some(reqwest::StatusCode::SERVICE_UNAVAILABLE) {
                    error!("Received 503. The daily request allowance for this API key may be used up.");
                }
                return Err(err);
            },
        };

        // Read the body first so a malformed payload surfaces as a decode error, not a transport one.
        let body = response.text().await.map_err(|e| {
            let err = LookupError::transport(stage, e);
            error!("Error reading response body from {}: {}", url, err);
            err
        })?;

        serde_json::from_str(&body).map_err(|e| {
            error!("Error parsing {} response JSON: {}", stage, e);
            LookupError::decode(stage, e)
        })
    }
}
