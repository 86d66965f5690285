use crate::domain::model::{Candidate, RawBusiness, RawPlace, NOT_AVAILABLE};

pub fn join_address(lines: &[String]) -> String {
    lines.join(", ")
}

pub fn join_categories(titles: &[String]) -> String {
    titles.join(", ")
}

/// Fuse one directory record with at most one enrichment record.
///
/// Name and address always come from the directory record. Every
/// enrichment-sourced field is populated with either real data or an explicit
/// sentinel ("N/A" for display fields, `None` for numerics, "" for the map
/// URL), so the candidate shape is stable no matter what the upstream
/// returned. Pure function of its two inputs.
pub fn fuse(business: &RawBusiness, place: Option<&RawPlace>) -> Candidate {
    Candidate {
        name: business.name.clone(),
        address: join_address(&business.display_address),
        directory_rating: business.rating,
        place_rating: place.and_then(|p| p.rating),
        place_review_count: place.and_then(|p| p.user_ratings_total),
        price: business
            .price
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        phone: business
            .display_phone
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        directory_url: business.url.clone(),
        map_url: place.map(|p| p.map_url.clone()).unwrap_or_default(),
        categories: join_categories(&business.categories),
    }
}
