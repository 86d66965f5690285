pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{google_places::PlacesClient, openai::OpenAiClient, yelp::YelpClient};
pub use config::{CliConfig, Credentials};
pub use crate::core::orchestrator::{Orchestrator, RunOutcome};
pub use domain::model::SearchQuery;
pub use utils::error::{ConciergeError, Result};
