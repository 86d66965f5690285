use crate::domain::model::{Candidate, RecommendationRequest, NOT_AVAILABLE};
use crate::domain::ports::RecommendationGenerator;
use crate::utils::error::Result;
use std::fmt::Display;

pub const SYSTEM_INSTRUCTION: &str =
    "You are a luxury restaurant recommender for high-end travel clients.";

/// Builds the concierge prompt and drives the summarization call. The
/// generated text is returned verbatim with no local post-processing.
pub struct RecommendationComposer<G: RecommendationGenerator> {
    generator: G,
}

impl<G: RecommendationGenerator> RecommendationComposer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn compose(&self, request: &RecommendationRequest) -> Result<String> {
        // No empty-candidates guard: the call is issued even with an empty
        // list, matching the documented behavior of the pipeline.
        let prompt = build_prompt(&request.location, &request.preferences, &request.candidates);
        tracing::debug!(
            "Composed prompt for {} candidates ({} chars)",
            request.candidates.len(),
            prompt.len()
        );
        self.generator.generate(SYSTEM_INSTRUCTION, &prompt).await
    }
}

pub(crate) fn build_prompt(location: &str, preferences: &str, candidates: &[Candidate]) -> String {
    format!(
        "You are a luxury travel concierge. Based on the location \"{}\" and the client \
         preferences \"{}\", review the following restaurant options and return a refined list \
         of 3-5 upscale restaurant recommendations. For each, include:\n\
         \n\
         - Name\n\
         - One-sentence description\n\
         - Cuisine type\n\
         - Price level\n\
         - Booking link (if available)\n\
         \n\
         Restaurant options:\n{}",
        location,
        preferences,
        render_candidates(candidates)
    )
}

fn render_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(render_candidate)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_candidate(candidate: &Candidate) -> String {
    let map_link = if candidate.map_url.is_empty() {
        NOT_AVAILABLE
    } else {
        candidate.map_url.as_str()
    };
    format!(
        "- {} | {}\n  \
         Directory rating: {} | Place rating: {} ({} reviews) | Price: {}\n  \
         Cuisine: {}\n  \
         Phone: {} | Listing: {} | Map: {}",
        candidate.name,
        candidate.address,
        candidate.directory_rating,
        render_optional(candidate.place_rating),
        render_optional(candidate.place_review_count),
        candidate.price,
        candidate.categories,
        candidate.phone,
        candidate.directory_url,
        map_link,
    )
}

fn render_optional<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConciergeError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MockGenerator {
        calls: Arc<Mutex<Vec<(String, String)>>>,
        reply: String,
    }

    impl MockGenerator {
        fn new(reply: &str) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                reply: reply.to_string(),
            }
        }
    }

    #[async_trait]
    impl RecommendationGenerator for MockGenerator {
        async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
            let mut calls = self.calls.lock().await;
            calls.push((system.to_string(), prompt.to_string()));
            Ok(self.reply.clone())
        }
    }

    fn candidate(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            address: "1 Rue de la Paix, St. Tropez".to_string(),
            directory_rating: 4.5,
            place_rating: None,
            place_review_count: None,
            price: NOT_AVAILABLE.to_string(),
            phone: "+33 4 94 00 00 00".to_string(),
            directory_url: "https://yelp.example/biz".to_string(),
            map_url: String::new(),
            categories: "French".to_string(),
        }
    }

    #[test]
    fn test_build_prompt_embeds_location_preferences_and_candidates() {
        let prompt = build_prompt(
            "St. Tropez",
            "romantic, ocean view",
            &[candidate("Le Petit Bistro")],
        );

        assert!(prompt.contains("luxury travel concierge"));
        assert!(prompt.contains("\"St. Tropez\""));
        assert!(prompt.contains("\"romantic, ocean view\""));
        assert!(prompt.contains("Le Petit Bistro"));
        assert!(prompt.contains("3-5 upscale restaurant recommendations"));
    }

    #[test]
    fn test_build_prompt_renders_unset_numerics_as_sentinel() {
        let prompt = build_prompt("St. Tropez", "", &[candidate("Le Petit Bistro")]);

        assert!(prompt.contains("Place rating: N/A (N/A reviews)"));
        assert!(prompt.contains("Map: N/A"));
    }

    #[test]
    fn test_build_prompt_preserves_candidate_order() {
        let prompt = build_prompt(
            "Tokyo",
            "",
            &[candidate("First"), candidate("Second"), candidate("Third")],
        );

        let first = prompt.find("First").unwrap();
        let second = prompt.find("Second").unwrap();
        let third = prompt.find("Third").unwrap();
        assert!(first < second && second < third);
    }

    #[tokio::test]
    async fn test_compose_returns_generated_text_verbatim() {
        let generator = MockGenerator::new("A fine list.\n1. Le Petit Bistro");
        let calls = Arc::clone(&generator.calls);
        let composer = RecommendationComposer::new(generator);

        let request = RecommendationRequest {
            location: "St. Tropez".to_string(),
            preferences: "seafood".to_string(),
            candidates: vec![candidate("Le Petit Bistro")],
        };

        let text = composer.compose(&request).await.unwrap();
        assert_eq!(text, "A fine list.\n1. Le Petit Bistro");

        let calls = calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, SYSTEM_INSTRUCTION);
        assert!(calls[0].1.contains("seafood"));
    }

    #[tokio::test]
    async fn test_compose_with_empty_candidates_still_calls_generator() {
        let generator = MockGenerator::new("nothing to recommend");
        let calls = Arc::clone(&generator.calls);
        let composer = RecommendationComposer::new(generator);

        let request = RecommendationRequest {
            location: "St. Tropez".to_string(),
            preferences: String::new(),
            candidates: Vec::new(),
        };

        composer.compose(&request).await.unwrap();
        assert_eq!(calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_compose_propagates_generation_error() {
        struct FailingGenerator;

        #[async_trait]
        impl RecommendationGenerator for FailingGenerator {
            async fn generate(&self, _system: &str, _prompt: &str) -> Result<String> {
                Err(ConciergeError::generation("completion returned no choices"))
            }
        }

        let composer = RecommendationComposer::new(FailingGenerator);
        let request = RecommendationRequest {
            location: "St. Tropez".to_string(),
            preferences: String::new(),
            candidates: vec![candidate("Le Petit Bistro")],
        };

        let err = composer.compose(&request).await.unwrap_err();
        assert!(matches!(err, ConciergeError::GenerationError { .. }));
    }
}
