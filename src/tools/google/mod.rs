pub mod commute;
pub mod hours;
pub mod places;

pub use commute::GoogleCommute;
pub use hours::GoogleHours;
pub use places::GooglePlaces;

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::core::error::{Result, SearchError};

pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Shared HTTP plumbing for the Maps web services.
#[derive(Clone)]
pub struct GoogleMapsClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Configuration(format!("Failed to build Maps HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_MAPS_BASE_URL.to_string(),
        })
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SearchError::Configuration("GOOGLE_MAPS_API_KEY is not set".to_string()))
    }

    pub async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let key = self.api_key()?;
        let body = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(params)
            .query(&[("key", key)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        serde_json::from_str(&body)
            .map_err(|e| SearchError::MalformedResponse(format!("{path} response was not valid JSON: {e}")))
    }
}

/// Top-level `status` of a Maps response.
pub(crate) fn response_status(data: &Value) -> Result<&str> {
    data.get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| SearchError::MalformedResponse("missing status field".to_string()))
}

pub(crate) fn status_error(service: &str, status: &str, data: &Value) -> SearchError {
    let message = data.get("error_message").and_then(Value::as_str).unwrap_or_default();
    SearchError::service(service, format!("status={status}. {message}").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_key_is_configuration_error() {
        let client = GoogleMapsClient::new(Some("   ".into()), Duration::from_secs(1)).unwrap();
        assert!(matches!(client.api_key(), Err(SearchError::Configuration(_))));
    }

    #[test]
    fn test_status_error_includes_message() {
        let data = json!({"status": "REQUEST_DENIED", "error_message": "API key invalid"});
        let err = status_error("places", response_status(&data).unwrap(), &data);
        assert_eq!(err.to_string(), "places returned an error: status=REQUEST_DENIED. API key invalid");
    }

    #[test]
    fn test_missing_status_is_malformed() {
        assert!(matches!(response_status(&json!({})), Err(SearchError::MalformedResponse(_))));
    }
}
