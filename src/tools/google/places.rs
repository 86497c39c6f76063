use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use super::{response_status, status_error, GoogleMapsClient};
use crate::core::error::{Result, SearchError};
use crate::core::types::Place;
use crate::tools::base::PlaceSearch;

pub const SOURCE: &str = "google_places_textsearch";

pub struct GooglePlaces {
    client: GoogleMapsClient,
    max_results: usize,
}

impl GooglePlaces {
    pub fn new(client: GoogleMapsClient, max_results: usize) -> Self {
        Self { client, max_results }
    }
}

#[async_trait]
impl PlaceSearch for GooglePlaces {
    async fn search(&self, query: &str) -> Result<Vec<Place>> {
        self.client.api_key()?;
        if query.trim().is_empty() {
            return Err(SearchError::InvalidInput("query is required".to_string()));
        }

        let data = self.client.get_json("place/textsearch/json", &[("query", query)]).await?;
        let places = parse_text_search(&data, self.max_results)?;
        info!("Places text search for {:?} returned {} usable places", query, places.len());
        Ok(places)
    }
}

/// `ZERO_RESULTS` is an empty success. Records without a name or place id are dropped.
pub fn parse_text_search(data: &Value, max_results: usize) -> Result<Vec<Place>> {
    match response_status(data)? {
        "OK" => {}
        "ZERO_RESULTS" => return Ok(Vec::new()),
        status => return Err(status_error("places", status, data)),
    }

    let results = data
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::MalformedResponse("places response has no results array".to_string()))?;

    let mut places = Vec::new();
    for record in results.iter().take(max_results) {
        match normalize_place(record) {
            Some(place) => places.push(place),
            None => debug!("Skipping unusable place record: missing name/place_id"),
        }
    }
    Ok(places)
}

fn normalize_place(record: &Value) -> Option<Place> {
    let text = |key: &str| record.get(key).and_then(Value::as_str).unwrap_or_default();

    let name = text("name");
    let place_id = text("place_id");
    if name.is_empty() || place_id.is_empty() {
        return None;
    }

    let address = match text("formatted_address") {
        "" => text("vicinity"),
        address => address,
    };
    let location = record.pointer("/geometry/location");
    let coordinate = |key: &str| location.and_then(|l| l.get(key)).and_then(Value::as_f64);

    Some(Place {
        name: name.to_string(),
        place_id: place_id.to_string(),
        address: address.to_string(),
        distance: None,
        rating: record.get("rating").and_then(Value::as_f64),
        user_ratings_total: record
            .get("user_ratings_total")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok()),
        lat: coordinate("lat"),
        lng: coordinate("lng"),
        source: SOURCE.to_string(),
        raw: record.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn sample_response() -> Value {
        json!({
            "status": "OK",
            "results": [
                {
                    "name": "Harbor Clinic",
                    "place_id": "p1",
                    "formatted_address": "1 Harbor Rd",
                    "rating": 4.5,
                    "user_ratings_total": 120,
                    "geometry": {"location": {"lat": 40.1, "lng": -73.9}}
                },
                {"name": "", "place_id": "p2", "formatted_address": "2 Nowhere"},
                {"name": "Corner Cafe", "place_id": "p3", "vicinity": "3 Main St"}
            ]
        })
    }

    #[test]
    fn test_parse_normalizes_and_drops_unusable() {
        let places = parse_text_search(&sample_response(), 10).unwrap();
        assert_eq!(places.len(), 2);

        assert_eq!(places[0].name, "Harbor Clinic");
        assert_eq!(places[0].address, "1 Harbor Rd");
        assert_eq!(places[0].rating, Some(4.5));
        assert_eq!(places[0].user_ratings_total, Some(120));
        assert_eq!(places[0].lat, Some(40.1));
        assert_eq!(places[0].source, SOURCE);

        assert_eq!(places[1].address, "3 Main St");
        assert_eq!(places[1].lat, None);
    }

    #[test]
    fn test_parse_respects_max_results() {
        let places = parse_text_search(&sample_response(), 1).unwrap();
        assert_eq!(places.len(), 1);
    }

    #[test]
    fn test_zero_results_is_empty() {
        let places = parse_text_search(&json!({"status": "ZERO_RESULTS", "results": []}), 10).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_denied_is_service_error() {
        let err = parse_text_search(&json!({"status": "OVER_QUERY_LIMIT"}), 10).unwrap_err();
        assert!(matches!(err, SearchError::Service { .. }));
    }

    #[test]
    fn test_ok_without_results_is_malformed() {
        let err = parse_text_search(&json!({"status": "OK"}), 10).unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_search_without_key_fails_before_network() {
        let places = GooglePlaces::new(GoogleMapsClient::new(None, Duration::from_secs(1)).unwrap(), 10);
        let err = places.search("cafe").await.unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let places = GooglePlaces::new(GoogleMapsClient::new(Some("k".into()), Duration::from_secs(1)).unwrap(), 10);
        let err = places.search("   ").await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }
}
