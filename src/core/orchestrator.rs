use crate::core::aggregator;
use crate::core::composer::RecommendationComposer;
use crate::domain::model::{Candidate, RawBusiness, RawPlace, RecommendationRequest, SearchQuery};
use crate::domain::ports::{DirectorySearch, PlaceEnrichment, RecommendationGenerator};
use crate::utils::error::{ConciergeError, Result};
use crate::utils::validation::validate_non_empty_string;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Terminal outcome of one orchestration run. An empty directory search is
/// informational, not an error.
#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    Done(String),
    NoResults,
}

/// Sequences search -> enrich-each -> compose. Single-use per invocation:
/// any external-call failure aborts the whole run with no partial results.
pub struct Orchestrator<D, P, G>
where
    D: DirectorySearch,
    P: PlaceEnrichment + 'static,
    G: RecommendationGenerator,
{
    directory: D,
    places: Arc<P>,
    composer: RecommendationComposer<G>,
    concurrent_requests: usize,
}

impl<D, P, G> Orchestrator<D, P, G>
where
    D: DirectorySearch,
    P: PlaceEnrichment + 'static,
    G: RecommendationGenerator,
{
    pub fn new(directory: D, places: P, generator: G, concurrent_requests: usize) -> Self {
        Self {
            directory,
            places: Arc::new(places),
            composer: RecommendationComposer::new(generator),
            concurrent_requests: concurrent_requests.max(1),
        }
    }

    pub async fn run(&self, query: &SearchQuery) -> Result<RunOutcome> {
        validate_non_empty_string("location", &query.location)?;

        tracing::info!("Searching directory for businesses in {}", query.location);
        let businesses = self
            .directory
            .search(&query.location, &query.preferences, query.limit)
            .await?;

        if businesses.is_empty() {
            tracing::info!("Directory search returned no businesses");
            return Ok(RunOutcome::NoResults);
        }
        tracing::info!("Found {} businesses, enriching", businesses.len());

        let places = self.enrich_all(&businesses).await?;
        let candidates: Vec<Candidate> = businesses
            .iter()
            .zip(places.iter())
            .map(|(business, place)| aggregator::fuse(business, place.as_ref()))
            .collect();

        let request = RecommendationRequest {
            location: query.location.clone(),
            preferences: query.preferences.clone(),
            candidates,
        };
        tracing::info!(
            "Composing recommendations from {} candidates",
            request.candidates.len()
        );
        let text = self.composer.compose(&request).await?;

        Ok(RunOutcome::Done(text))
    }

    /// Fan out the per-candidate enrichment lookups in bounded batches.
    /// Results are written back by original index, so the candidate order
    /// always matches the upstream search order. One failed lookup aborts
    /// the whole run.
    async fn enrich_all(&self, businesses: &[RawBusiness]) -> Result<Vec<Option<RawPlace>>> {
        let mut matches: Vec<Option<RawPlace>> = Vec::with_capacity(businesses.len());
        matches.resize_with(businesses.len(), || None);

        let indexed: Vec<(usize, &RawBusiness)> = businesses.iter().enumerate().collect();
        for batch in indexed.chunks(self.concurrent_requests) {
            let mut tasks = JoinSet::new();
            for &(index, business) in batch {
                let places = Arc::clone(&self.places);
                let name = business.name.clone();
                let address = aggregator::join_address(&business.display_address);
                tasks.spawn(async move {
                    let place = places.find_best_match(&name, &address).await?;
                    Ok::<(usize, Option<RawPlace>), ConciergeError>((index, place))
                });
            }

            while let Some(joined) = tasks.join_next().await {
                let (index, place) =
                    joined.map_err(|e| ConciergeError::upstream("places", e))??;
                matches[index] = place;
            }
        }

        Ok(matches)
    }
}
