use crate::api::AccuWeatherClient;
use crate::error::{LookupError, Stage};
use serde::de::Error as _;
use crate::models::{CityQuery, LocationKey};
use tracing::debug;

/// Turns a city name into a provider location key, restricted to one country.
pub struct LocationResolver<'a> {
    client: &'a AccuWeatherClient,
    country: &'a str,
}

impl<'a> LocationResolver<'a> {
    pub fn new(client: &'a AccuWeatherClient, country: &'a str) -> Self {
        Self { client, country }
    }

    /// Keeps the results whose country matches and returns the first one in provider order.
    ///
    /// No ranking beyond that: if the provider lists two "Ikeja"s, the first one wins.
    pub async fn resolve(&self, city: &CityQuery) -> Result<LocationKey, LookupError> {
        let results = self
            .client
            .search_locations(city.as_str(), self.country)
            .await?;
        debug!("Search for {:?} returned {} locations", city.as_str(), results.len());

        if results.is_empty() {
            return Err(LookupError::NoMatch);
        }

        let location = results
            .into_iter()
            .find(|r| r.country_id() == Some(self.country))
            .ok_or_else(|| LookupError::NoCountryMatch {
                country: self.country.to_string(),
            })?;

        // Only the selected entry has to carry a key
        let key = location.key.ok_or_else(|| {
            LookupError::decode(Stage::Search, serde_json::Error::missing_field("Key"))
        })?;

        debug!(
            "Resolved {:?} to key {} ({})",
            city.as_str(),
            key,
            location.localized_name.as_deref().unwrap_or("unnamed")
        );
        Ok(LocationKey::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    async fn resolve_against(body: serde_json::Value, city: &str) -> Result<LocationKey, LookupError> {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/locations/v1/search")
            .match_query(Matcher::UrlEncoded("q".into(), city.into()))
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = AccuWeatherClient::new("k".to_string(), &server.url()).unwrap();
        let resolver = LocationResolver::new(&client, "NG");
        resolver.resolve(&CityQuery::new(city).unwrap()).await
    }

    #[tokio::test]
    async fn test_empty_search_is_no_match() {
        let result = resolve_against(json!([]), "Atlantis").await;
        assert!(matches!(result, Err(LookupError::NoMatch)));
    }

    #[tokio::test]
    async fn test_only_foreign_results_is_no_country_match() {
        let body = json!([
            { "Key": "623", "LocalizedName": "Paris", "Country": { "ID": "FR" } },
            { "Key": "336", "LocalizedName": "Paris", "Country": { "ID": "US" } }
        ]);
        match resolve_against(body, "Paris").await {
            Err(LookupError::NoCountryMatch { country }) => assert_eq!(country, "NG"),
            other => panic!("expected NoCountryMatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_matching_country_wins_in_provider_order() {
        let body = json!([
            { "Key": "111", "LocalizedName": "Ikeja", "Country": { "ID": "GH" } },
            { "Key": "222", "LocalizedName": "Ikeja", "Country": { "ID": "NG" } },
            { "Key": "333", "LocalizedName": "Ikeja GRA", "Country": { "ID": "NG" } }
        ]);
        let key = resolve_against(body, "Ikeja").await.unwrap();
        assert_eq!(key, LocationKey::new("222"));
    }

    #[tokio::test]
    async fn test_entries_without_country_are_skipped() {
        let body = json!([
            { "Key": "1" },
            { "Key": "2", "Country": {} },
            { "LocalizedName": "Lagos", "Country": { "ID": "GH" } },
            { "Key": "4607", "Country": { "ID": "NG" } }
        ]);
        let key = resolve_against(body, "Lagos").await.unwrap();
        assert_eq!(key, LocationKey::new("4607"));
    }

    #[tokio::test]
    async fn test_selected_entry_without_key_is_decode_error() {
        let body = json!([{ "LocalizedName": "Lagos", "Country": { "ID": "NG" } }]);
        let result = resolve_against(body, "Lagos").await;
        assert!(matches!(
            result,
            Err(LookupError::Decode {
                stage: Stage::Search,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_decode_error() {
        let body = json!({ "Code": "ServiceUnavailable" });
        let result = resolve_against(body, "Lagos").await;
        assert!(matches!(result, Err(LookupError::Decode { .. })));
    }
}
