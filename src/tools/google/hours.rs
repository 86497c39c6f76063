use async_trait::async_trait;
use serde_json::Value;

use super::{response_status, status_error, GoogleMapsClient};
use crate::core::error::{Result, SearchError};
use crate::tools::base::{hours_unavailable, HoursLookup};

/// Text Search for the best match, then Place Details for `opening_hours`.
pub struct GoogleHours {
    client: GoogleMapsClient,
}

impl GoogleHours {
    pub fn new(client: GoogleMapsClient) -> Self {
        Self { client }
    }

    async fn find_place_id(&self, place_name: &str) -> Result<Option<String>> {
        let data = self.client.get_json("place/textsearch/json", &[("query", place_name)]).await?;
        if response_status(&data)? != "OK" {
            return Ok(None);
        }
        Ok(data
            .pointer("/results/0/place_id")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn details(&self, place_id: &str) -> Result<Option<Value>> {
        let data = self
            .client
            .get_json(
                "place/details/json",
                &[("place_id", place_id), ("fields", "name,opening_hours,utc_offset_minutes")],
            )
            .await?;
        match response_status(&data)? {
            "OK" => Ok(data.get("result").cloned()),
            "NOT_FOUND" => Ok(None),
            status => Err(status_error("place details", status, &data)),
        }
    }
}

#[async_trait]
impl HoursLookup for GoogleHours {
    async fn hours(&self, place_name: &str) -> Result<String> {
        self.client.api_key()?;
        if place_name.trim().is_empty() {
            return Err(SearchError::InvalidInput("place_name is required".to_string()));
        }

        let Some(place_id) = self.find_place_id(place_name).await? else {
            return Ok(hours_unavailable(format!("No matching place found for '{place_name}'.")));
        };
        let Some(details) = self.details(&place_id).await? else {
            return Ok(hours_unavailable(format!("Could not fetch details for '{place_name}'.")));
        };
        Ok(format_opening_hours(&details, place_name))
    }
}

pub fn format_opening_hours(details: &Value, place_name: &str) -> String {
    let display_name = details.get("name").and_then(Value::as_str).unwrap_or(place_name);

    let Some(opening_hours) = details.get("opening_hours") else {
        return hours_unavailable(format!("'{display_name}' has no opening hours listed."));
    };

    if let Some(weekday_text) = opening_hours.get("weekday_text").and_then(Value::as_array) {
        let days: Vec<&str> = weekday_text.iter().filter_map(Value::as_str).collect();
        if !days.is_empty() {
            return days.join(" | ");
        }
    }

    match opening_hours.get("open_now").and_then(Value::as_bool) {
        Some(true) => "Currently open.".to_string(),
        Some(false) => "Currently closed.".to_string(),
        None => hours_unavailable(format!("No readable hours returned for '{display_name}'.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::base::HOURS_UNAVAILABLE;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_weekday_text_joined() {
        let details = json!({
            "name": "Harbor Clinic",
            "opening_hours": {"weekday_text": ["Mon: 9:00 AM – 5:00 PM", "Tue: 9:00 AM – 5:00 PM"]}
        });
        assert_eq!(
            format_opening_hours(&details, "x"),
            "Mon: 9:00 AM – 5:00 PM | Tue: 9:00 AM – 5:00 PM"
        );
    }

    #[test]
    fn test_open_now_fallback() {
        let details = json!({"opening_hours": {"open_now": false}});
        assert_eq!(format_opening_hours(&details, "x"), "Currently closed.");
    }

    #[test]
    fn test_missing_hours_is_sentinel() {
        let hours = format_opening_hours(&json!({"name": "Depot"}), "x");
        assert!(hours.starts_with(HOURS_UNAVAILABLE));
        assert!(hours.contains("'Depot'"));
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let hours = GoogleHours::new(GoogleMapsClient::new(None, Duration::from_secs(1)).unwrap());
        assert!(matches!(hours.hours("Depot").await, Err(SearchError::Configuration(_))));
    }
}
