use super::first_entry;
use crate::api::AccuWeatherClient;
use crate::error::{LookupError, Stage};
use crate::models::{AirQualityReading, LocationKey};

/// Fetches the current air-quality index for a resolved location.
pub struct AirQualityFetcher<'a> {
    client: &'a AccuWeatherClient,
}

impl<'a> AirQualityFetcher<'a> {
    pub fn new(client: &'a AccuWeatherClient) -> Self {
        Self { client }
    }

    pub async fn fetch_aqi(&self, key: &LocationKey) -> Result<AirQualityReading, LookupError> {
        let indices = self.client.air_quality(key).await?;
        first_entry(indices, Stage::AirQuality).map(AirQualityReading::from)
    }
}
