use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::types::Place;

pub const HOURS_UNAVAILABLE: &str = "Hours unavailable";

pub fn hours_unavailable(reason: impl std::fmt::Display) -> String {
    format!("{HOURS_UNAVAILABLE}: {reason}")
}

pub fn commute_error(reason: impl std::fmt::Display) -> String {
    format!("Error: {reason}")
}

/// External directory service. Unusable records never leave the implementation.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Place>>;

    fn name(&self) -> &str {
        "search_places"
    }
}

/// Human-readable schedule, or a [`HOURS_UNAVAILABLE`] sentinel.
#[async_trait]
pub trait HoursLookup: Send + Sync {
    async fn hours(&self, place_name: &str) -> Result<String>;
}

#[async_trait]
pub trait CommuteLookup: Send + Sync {
    async fn commute(&self, place_name: &str, origin: &str) -> Result<String>;
}

/// Scores are clamped to [0, 1] by implementations.
#[async_trait]
pub trait TrustAssessor: Send + Sync {
    async fn trust(&self, place: &Place) -> Result<f64>;
}
