use crate::domain::model::RawBusiness;
use crate::domain::ports::DirectorySearch;
use crate::utils::error::{ConciergeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";
const SEARCH_TERM: &str = "fine dining";
const SEARCH_CATEGORIES: &str = "restaurants";
const SEARCH_SORT: &str = "rating";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SERVICE: &str = "directory";

/// Yelp business-search client. Result ordering is the upstream relevance
/// sort; no local re-sorting happens here.
pub struct YelpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YelpClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        // A client without the bounded timeout is worse than no client at all
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
}

/// The upstream query is a fixed fine-dining category filter; the free-text
/// preferences never reach it and only feed the summarization prompt.
fn search_params(location: &str, limit: u32) -> Vec<(&'static str, String)> {
    vec![
        ("location", location.to_string()),
        ("term", SEARCH_TERM.to_string()),
        ("categories", SEARCH_CATEGORIES.to_string()),
        ("sort_by", SEARCH_SORT.to_string()),
        ("limit", limit.to_string()),
    ]
}

#[async_trait]
impl DirectorySearch for YelpClient {
    async fn search(
        &self,
        location: &str,
        _preferences: &str,
        limit: u32,
    ) -> Result<Vec<RawBusiness>> {
        let url = format!("{}/businesses/search", self.base_url);

        tracing::debug!("Directory search for businesses in {}", location);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&search_params(location, limit))
            .send()
            .await
            .map_err(|e| ConciergeError::upstream(SERVICE, e))?;

        let status = response.status();
        tracing::debug!("Directory search response status: {}", status);
        if !status.is_success() {
            return Err(ConciergeError::upstream(
                SERVICE,
                format!("unexpected status {}", status),
            ));
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| ConciergeError::upstream(SERVICE, e))?;

        Ok(payload.businesses.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<BusinessRecord>,
}

#[derive(Debug, Deserialize)]
struct BusinessRecord {
    name: String,
    location: BusinessLocation,
    rating: f64,
    price: Option<String>,
    display_phone: Option<String>,
    #[serde(default)]
    categories: Vec<CategoryRecord>,
    url: String,
}

#[derive(Debug, Deserialize)]
struct BusinessLocation {
    #[serde(default)]
    display_address: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    title: String,
}

impl From<BusinessRecord> for RawBusiness {
    fn from(record: BusinessRecord) -> Self {
        Self {
            name: record.name,
            display_address: record.location.display_address,
            rating: record.rating,
            price: record.price,
            // Upstream sends "" for businesses without a listed phone
            display_phone: record.display_phone.filter(|p| !p.is_empty()),
            categories: record.categories.into_iter().map(|c| c.title).collect(),
            url: record.url,
        }
    }
}
