/// Placeholder for enrichment data that could not be obtained. Downstream
/// consumers always see a fully populated field set, never a missing key.
pub const NOT_AVAILABLE: &str = "N/A";

pub const DEFAULT_RESULT_LIMIT: u32 = 5;

/// One orchestration run's input, built once and never mutated.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub location: String,
    pub preferences: String,
    pub limit: u32,
}

impl SearchQuery {
    pub fn new(location: impl Into<String>, preferences: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            preferences: preferences.into(),
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// A business record as returned by the directory search. Absence of a field
/// is a typed state, not a missing JSON key.
#[derive(Debug, Clone)]
pub struct RawBusiness {
    pub name: String,
    pub display_address: Vec<String>,
    pub rating: f64,
    pub price: Option<String>,
    pub display_phone: Option<String>,
    pub categories: Vec<String>,
    pub url: String,
}

/// The normalized subset of a places-API record used for enrichment.
#[derive(Debug, Clone)]
pub struct RawPlace {
    pub name: String,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub photo_reference: Option<String>,
    pub place_id: String,
    pub map_url: String,
}

/// One directory record fused with at most one enrichment record.
///
/// `name` and `address` always come from the directory record (ground truth
/// for identity); enrichment fields carry real data or an explicit sentinel.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub address: String,
    pub directory_rating: f64,
    pub place_rating: Option<f64>,
    pub place_review_count: Option<u64>,
    pub price: String,
    pub phone: String,
    pub directory_url: String,
    pub map_url: String,
    pub categories: String,
}

/// Everything the composer needs for one summarization call.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub location: String,
    pub preferences: String,
    pub candidates: Vec<Candidate>,
}
