use crate::domain::model::RawPlace;
use crate::domain::ports::PlaceEnrichment;
use crate::utils::error::{ConciergeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const MAPS_PLACE_URL: &str = "https://www.google.com/maps/place/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SERVICE: &str = "places";

pub const DEFAULT_PHOTO_WIDTH: u32 = 400;

/// Google Places text-search client used for enrichment lookups.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PlacesClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ConciergeError::config(format!("failed to build {} client: {}", SERVICE, e)))?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Pure URL builder for a place photo; nothing is fetched here.
    pub fn photo_url(&self, photo_reference: &str, maxwidth: u32) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("maxwidth", &maxwidth.to_string())
            .append_pair("photoreference", photo_reference)
            .append_pair("key", &self.api_key)
            .finish();
        format!("{}/photo?{}", self.base_url, query)
    }
}

/// Canonical map link for a place identifier.
pub fn maps_url(place_id: &str) -> String {
    format!("{}?q=place_id:{}", MAPS_PLACE_URL, place_id)
}

#[async_trait]
impl PlaceEnrichment for PlacesClient {
    async fn find_best_match(&self, name: &str, address: &str) -> Result<Option<RawPlace>> {
        let query = format!("{}, {}", name, address);
        let url = format!("{}/textsearch/json", self.base_url);

        tracing::debug!("Place lookup for {}", name);
        let response = self
            .client
            .get(&url)
            .query(&[("query", query.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ConciergeError::upstream(SERVICE, e))?;

        let status = response.status();
        tracing::debug!("Place lookup response status: {}", status);
        if !status.is_success() {
            return Err(ConciergeError::upstream(
                SERVICE,
                format!("unexpected status {}", status),
            ));
        }

        let payload: TextSearchResponse = response
            .json()
            .await
            .map_err(|e| ConciergeError::upstream(SERVICE, e))?;

        // First result wins: the upstream relevance ordering is trusted and
        // no local scoring or fuzzy matching is attempted. An empty result
        // set is a normal "no match", not a failure.
        Ok(payload.results.into_iter().next().map(Into::into))
    }
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<PlaceRecord>,
}

#[derive(Debug, Deserialize)]
struct PlaceRecord {
    name: String,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    #[serde(default)]
    photos: Vec<PhotoRecord>,
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct PhotoRecord {
    photo_reference: String,
}

impl From<PlaceRecord> for RawPlace {
    fn from(record: PlaceRecord) -> Self {
        let map_url = maps_url(&record.place_id);
        Self {
            name: record.name,
            rating: record.rating,
            user_ratings_total: record.user_ratings_total,
            photo_reference: record
                .photos
                .into_iter()
                .next()
                .map(|p| p.photo_reference),
            place_id: record.place_id,
            map_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn place_payload() -> serde_json::Value {
        serde_json::json!({
            "results": [
                {
                    "name": "Le Petit Bistro",
                    "rating": 4.6,
                    "user_ratings_total": 321,
                    "photos": [{"photo_reference": "photo-ref-1"}],
                    "place_id": "place-id-1"
                },
                {
                    "name": "Le Petit Bistro Annexe",
                    "rating": 3.9,
                    "user_ratings_total": 12,
                    "place_id": "place-id-2"
                }
            ]
        })
    }

    #[test]
    fn test_client_builds_with_bounded_timeout() {
        assert!(PlacesClient::new("test-google-key".to_string()).is_ok());
    }

    #[tokio::test]
    async fn test_find_best_match_first_result_wins() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/textsearch/json")
                .query_param("query", "Le Petit Bistro, 1 Rue de la Paix, St. Tropez")
                .query_param("key", "test-google-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(place_payload());
        });

        let client =
            PlacesClient::with_base_url("test-google-key".to_string(), server.url("")).unwrap();
        let result = client
            .find_best_match("Le Petit Bistro", "1 Rue de la Paix, St. Tropez")
            .await
            .unwrap()
            .unwrap();

        api_mock.assert();
        assert_eq!(result.name, "Le Petit Bistro");
        assert_eq!(result.rating, Some(4.6));
        assert_eq!(result.user_ratings_total, Some(321));
        assert_eq!(result.photo_reference.as_deref(), Some("photo-ref-1"));
        assert_eq!(
            result.map_url,
            "https://www.google.com/maps/place/?q=place_id:place-id-1"
        );
    }

    #[tokio::test]
    async fn test_find_best_match_empty_results_is_no_match() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/textsearch/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"results": []}));
        });

        let client =
            PlacesClient::with_base_url("test-google-key".to_string(), server.url("")).unwrap();
        let result = client
            .find_best_match("Nowhere House", "No Such Street")
            .await
            .unwrap();

        api_mock.assert();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_best_match_is_idempotent_against_frozen_upstream() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/textsearch/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(place_payload());
        });

        let client =
            PlacesClient::with_base_url("test-google-key".to_string(), server.url("")).unwrap();
        let first = client
            .find_best_match("Le Petit Bistro", "1 Rue de la Paix, St. Tropez")
            .await
            .unwrap()
            .unwrap();
        let second = client
            .find_best_match("Le Petit Bistro", "1 Rue de la Paix, St. Tropez")
            .await
            .unwrap()
            .unwrap();

        api_mock.assert_hits(2);
        assert_eq!(first.place_id, second.place_id);
        assert_eq!(first.rating, second.rating);
        assert_eq!(first.map_url, second.map_url);
    }

    #[tokio::test]
    async fn test_find_best_match_http_failure_is_upstream_error() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/textsearch/json");
            then.status(503);
        });

        let client =
            PlacesClient::with_base_url("test-google-key".to_string(), server.url("")).unwrap();
        let err = client
            .find_best_match("Le Petit Bistro", "1 Rue de la Paix")
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(err, ConciergeError::UpstreamError { .. }));
    }

    #[test]
    fn test_photo_url_builder() {
        let client = PlacesClient::with_base_url(
            "test-google-key".to_string(),
            "https://maps.example/api".to_string(),
        )
        .unwrap();
        let url = client.photo_url("ref with space", DEFAULT_PHOTO_WIDTH);

        assert!(url.starts_with("https://maps.example/api/photo?"));
        assert!(url.contains("maxwidth=400"));
        assert!(url.contains("photoreference=ref+with+space"));
        assert!(url.contains("key=test-google-key"));
    }

    #[test]
    fn test_maps_url_builder() {
        assert_eq!(
            maps_url("abc123"),
            "https://www.google.com/maps/place/?q=place_id:abc123"
        );
    }
}
