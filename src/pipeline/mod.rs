//! The lookup pipeline: resolve the city, fetch its weather, then its air quality.
//!
//! Stages run strictly one after another. A failed resolution or weather fetch
//! ends the run; a failed air-quality fetch is kept in the report as a warning
//! and the weather is still returned.

mod air_quality;
mod conditions;
mod resolver;

pub use air_quality::AirQualityFetcher;
pub use conditions::ConditionsFetcher;
pub use resolver::LocationResolver;

use crate::api::AccuWeatherClient;
use crate::error::{LookupError, Stage};
use crate::models::{CityQuery, DashboardReport};
use tracing::{info, warn};

/// Providers answer with a list even for single readings; the first entry is the reading.
fn first_entry<T>(items: Vec<T>, stage: Stage) -> Result<T, LookupError> {
    items
        .into_iter()
        .next()
        .ok_or(LookupError::EmptyResult { stage })
}

/// Runs city lookups against one provider client for one configured country.
pub struct Pipeline {
    client: AccuWeatherClient,
    country: String,
}

impl Pipeline {
    pub fn new(client: AccuWeatherClient, country: String) -> Self {
        Self { client, country }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Runs a lookup without progress reporting.
    #[cfg(test)]
    pub async fn run(&self, city: &CityQuery) -> Result<DashboardReport, LookupError> {
        self.run_with(city, |_| {}).await
    }

    /// Runs a lookup, calling `on_stage` as each stage starts.
    pub async fn run_with<F>(
        &self,
        city: &CityQuery,
        mut on_stage: F,
    ) -> Result<DashboardReport, LookupError>
    where
        F: FnMut(Stage),
    {
        info!("Looking up {:?} in {}", city.as_str(), self.country);

        on_stage(Stage::Search);
        let location_key = LocationResolver::new(&self.client, &self.country)
            .resolve(city)
            .await?;
        info!("Found location key: {}", location_key);

        on_stage(Stage::Weather);
        let weather = ConditionsFetcher::new(&self.client)
            .fetch_current(&location_key)
            .await?;

        on_stage(Stage::AirQuality);
        let air_quality = AirQualityFetcher::new(&self.client)
            .fetch_aqi(&location_key)
            .await;
        if let Err(e) = &air_quality {
            warn!("Air quality unavailable for {}: {}", location_key, e);
        }

        Ok(DashboardReport {
            city: city.clone(),
            location_key,
            weather,
            air_quality,
        })
    }
}
