// Adapters layer: concrete clients for the external services (directory
// search, place enrichment, text generation).

pub mod google_places;
pub mod openai;
pub mod yelp;
