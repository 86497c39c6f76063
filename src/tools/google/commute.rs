use async_trait::async_trait;
use serde_json::Value;

use super::{response_status, status_error, GoogleMapsClient};
use crate::core::error::{Result, SearchError};
use crate::core::geo::Coordinates;
use crate::tools::base::CommuteLookup;

/// Distance Matrix based travel time.
pub struct GoogleCommute {
    client: GoogleMapsClient,
    mode: String,
    units: String,
}

impl GoogleCommute {
    pub fn new(client: GoogleMapsClient, mode: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            client,
            mode: mode.into(),
            units: units.into(),
        }
    }
}

#[async_trait]
impl CommuteLookup for GoogleCommute {
    async fn commute(&self, place_name: &str, origin: &str) -> Result<String> {
        self.client.api_key()?;
        if place_name.trim().is_empty() || origin.trim().is_empty() {
            return Err(SearchError::InvalidInput(
                "place_name and user_location are required".to_string(),
            ));
        }

        let origins = match Coordinates::parse(origin) {
            Some(coordinates) => coordinates.to_string(),
            None => origin.trim().to_string(),
        };
        let data = self
            .client
            .get_json(
                "distancematrix/json",
                &[
                    ("origins", origins.as_str()),
                    ("destinations", place_name.trim()),
                    ("mode", self.mode.as_str()),
                    ("units", self.units.as_str()),
                ],
            )
            .await?;
        parse_distance_matrix(&data)
    }
}

/// Prefers the traffic-aware duration when present.
pub fn parse_distance_matrix(data: &Value) -> Result<String> {
    let status = response_status(data)?;
    if status != "OK" {
        return Err(status_error("distance matrix", status, data));
    }

    let element = data
        .pointer("/rows/0/elements/0")
        .ok_or_else(|| SearchError::MalformedResponse("no elements returned from distance matrix".to_string()))?;

    let element_status = element.get("status").and_then(Value::as_str).unwrap_or("UNKNOWN");
    if element_status != "OK" {
        return Err(SearchError::service(
            "distance matrix",
            format!("no route found (status={element_status})"),
        ));
    }

    element
        .pointer("/duration_in_traffic/text")
        .or_else(|| element.pointer("/duration/text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SearchError::MalformedResponse("duration not available".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_duration_in_traffic() {
        let data = json!({
            "status": "OK",
            "rows": [{"elements": [{
                "status": "OK",
                "duration": {"text": "15 mins"},
                "duration_in_traffic": {"text": "21 mins"}
            }]}]
        });
        assert_eq!(parse_distance_matrix(&data).unwrap(), "21 mins");
    }

    #[test]
    fn test_plain_duration() {
        let data = json!({
            "status": "OK",
            "rows": [{"elements": [{"status": "OK", "duration": {"text": "17 mins"}}]}]
        });
        assert_eq!(parse_distance_matrix(&data).unwrap(), "17 mins");
    }

    #[test]
    fn test_no_route_is_service_error() {
        let data = json!({"status": "OK", "rows": [{"elements": [{"status": "ZERO_RESULTS"}]}]});
        let err = parse_distance_matrix(&data).unwrap_err();
        assert!(err.to_string().contains("ZERO_RESULTS"));
    }

    #[test]
    fn test_empty_rows_is_malformed() {
        let err = parse_distance_matrix(&json!({"status": "OK", "rows": []})).unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }
}
