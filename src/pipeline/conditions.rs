use super::first_entry;
use crate::api::AccuWeatherClient;
use crate::error::{LookupError, Stage};
use crate::models::{LocationKey, WeatherReading};

/// Fetches the current weather for a resolved location.
pub struct ConditionsFetcher<'a> {
    client: &'a AccuWeatherClient,
}

impl<'a> ConditionsFetcher<'a> {
    pub fn new(client: &'a AccuWeatherClient) -> Self {
        Self { client }
    }

    pub async fn fetch_current(&self, key: &LocationKey) -> Result<WeatherReading, LookupError> {
        let conditions = self.client.current_conditions(key).await?;
        first_entry(conditions, Stage::Weather).map(WeatherReading::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_list_is_empty_result() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/currentconditions/v1/99")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = AccuWeatherClient::new("k".to_string(), &server.url()).unwrap();
        let result = ConditionsFetcher::new(&client)
            .fetch_current(&LocationKey::new("99"))
            .await;

        assert!(matches!(
            result,
            Err(LookupError::EmptyResult {
                stage: Stage::Weather
            })
        ));
    }

    #[tokio::test]
    async fn test_takes_first_entry() {
        let mut server = mockito::Server::new_async().await;
        let entry = |text: &str, temp: f64| {
            json!({
                "WeatherText": text,
                "Temperature": { "Metric": { "Value": temp, "Unit": "C" } },
                "RelativeHumidity": 50,
                "Wind": { "Speed": { "Metric": { "Value": 1.9, "Unit": "km/h" } } },
                "UVIndex": 4
            })
        };
        let _m = server
            .mock("GET", "/currentconditions/v1/99")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!([entry("Sunny", 33.0), entry("Stale", 12.0)]).to_string())
            .create_async()
            .await;

        let client = AccuWeatherClient::new("k".to_string(), &server.url()).unwrap();
        let reading = ConditionsFetcher::new(&client)
            .fetch_current(&LocationKey::new("99"))
            .await
            .unwrap();

        assert_eq!(reading.condition, "Sunny");
        assert_eq!(reading.uv_index, 4);
        assert!((reading.wind_speed - 1.9).abs() < 1e-9);
    }
}
