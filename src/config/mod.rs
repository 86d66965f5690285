use crate::utils::error::{ConciergeError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use clap::Parser;

pub const YELP_API_KEY_VAR: &str = "YELP_API_KEY";
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Parser)]
#[command(name = "dining-concierge")]
#[command(about = "Curated upscale restaurant recommendations for a travel destination")]
pub struct CliConfig {
    /// Destination to search, e.g. "St. Tropez" or "Tokyo"
    pub location: String,

    /// Free-text client preferences, e.g. "romantic, ocean view, seafood"
    #[arg(long, default_value = "")]
    pub preferences: String,

    /// Maximum number of businesses to fetch from the directory search
    #[arg(long, default_value = "5")]
    pub limit: u32,

    /// Upper bound on in-flight enrichment lookups
    #[arg(long, default_value = "4")]
    pub concurrent_requests: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("location", &self.location)?;
        // The directory API caps the result limit at 50.
        validate_range("limit", self.limit, 1, 50)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        Ok(())
    }
}

/// API credentials for the three upstream services, resolved once at startup
/// and handed to each client by value. There is no ambient global state.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub yelp_api_key: String,
    pub google_api_key: String,
    pub openai_api_key: String,
}

impl Credentials {
    /// Fails fast before any orchestration run if a key is missing.
    pub fn from_env() -> Result<Self> {
        Self::from_source(|var| std::env::var(var).ok())
    }

    fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |var: &str| {
            get(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConciergeError::config(format!("{} is not set", var)))
        };

        Ok(Self {
            yelp_api_key: require(YELP_API_KEY_VAR)?,
            google_api_key: require(GOOGLE_API_KEY_VAR)?,
            openai_api_key: require(OPENAI_API_KEY_VAR)?,
        })
    }
}
