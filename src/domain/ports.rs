use crate::domain::model::{RawBusiness, RawPlace};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Business-directory search. `preferences` is accepted for interface
/// stability but the upstream query does not use it; only the summarization
/// prompt does.
#[async_trait]
pub trait DirectorySearch: Send + Sync {
    async fn search(&self, location: &str, preferences: &str, limit: u32)
        -> Result<Vec<RawBusiness>>;
}

/// Places lookup for a single best-matching record. `Ok(None)` means the
/// upstream found nothing, which is an expected outcome, not a failure.
#[async_trait]
pub trait PlaceEnrichment: Send + Sync {
    async fn find_best_match(&self, name: &str, address: &str) -> Result<Option<RawPlace>>;
}

/// Chat-style text generation: a fixed system instruction plus one user
/// prompt, returning the assistant's text verbatim.
#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String>;
}
