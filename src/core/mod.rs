pub mod aggregator;
pub mod composer;
pub mod orchestrator;

pub use crate::domain::model::{
    Candidate, RawBusiness, RawPlace, RecommendationRequest, SearchQuery,
};
pub use crate::domain::ports::{DirectorySearch, PlaceEnrichment, RecommendationGenerator};
pub use crate::utils::error::Result;
