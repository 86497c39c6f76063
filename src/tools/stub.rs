use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::types::Place;
use crate::tools::base::{CommuteLookup, HoursLookup, PlaceSearch};
use crate::utils::title_case;

const STUB_PLACES: [(&str, f64); 3] = [("123 Main St", 1.2), ("456 Elm St", 3.4), ("789 Oak Ave", 5.6)];

/// Offline directory returning three synthetic places per query.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubDirectory;

#[async_trait]
impl PlaceSearch for StubDirectory {
    async fn search(&self, query: &str) -> Result<Vec<Place>> {
        let title = title_case(query);
        Ok(STUB_PLACES
            .iter()
            .enumerate()
            .map(|(i, (address, distance))| {
                Place::new(format!("{title} Place {}", i + 1), *address, Some(*distance))
                    .with_place_id(format!("stub-{}", i + 1))
            })
            .collect())
    }

    fn name(&self) -> &str {
        "stub_places"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StubHours;

#[async_trait]
impl HoursLookup for StubHours {
    async fn hours(&self, _place_name: &str) -> Result<String> {
        Ok("9am - 5pm".to_string())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StubCommute;

#[async_trait]
impl CommuteLookup for StubCommute {
    async fn commute(&self, place_name: &str, _origin: &str) -> Result<String> {
        Ok(format!("{} mins", 10 + place_name.chars().count() % 30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_directory_titles_query() {
        let places = StubDirectory.search("coffee shop").await.unwrap();
        assert_eq!(places.len(), 3);
        assert_eq!(places[0].name, "Coffee Shop Place 1");
        assert_eq!(places[2].address, "789 Oak Ave");
        assert_eq!(places[1].distance, Some(3.4));
    }

    #[tokio::test]
    async fn test_stub_commute_depends_on_name_length() {
        assert_eq!(StubCommute.commute("abc", "here").await.unwrap(), "13 mins");
        assert_eq!(StubHours.hours("abc").await.unwrap(), "9am - 5pm");
    }
}
