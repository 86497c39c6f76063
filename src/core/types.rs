use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Domain {
    Generic,
    Healthcare,
    #[default]
    Unknown,
}

impl Domain {
    pub fn tag(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A place as returned by the directory service. Never mutated after retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub address: String,
    /// Kilometres from the user, when it could be derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub raw: Value,
}

impl Place {
    pub fn new(name: impl Into<String>, address: impl Into<String>, distance: Option<f64>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            distance,
            ..Default::default()
        }
    }

    /// Duplicate detection key. `None` means the place cannot be matched against anything.
    pub fn identity_key(&self) -> Option<&str> {
        if self.name.is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }

    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = place_id.into();
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    pub fn with_rating(mut self, rating: f64, total: u32) -> Self {
        self.rating = Some(rating);
        self.user_ratings_total = Some(total);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPlace {
    #[serde(flatten)]
    pub place: Place,
    pub open_hours: String,
    /// In [0, 1]. `None` when the trust lookup failed.
    pub trust_score: Option<f64>,
    pub commute: String,
}

impl EnrichedPlace {
    pub fn new(place: Place, open_hours: impl Into<String>, trust_score: Option<f64>, commute: impl Into<String>) -> Self {
        Self {
            place,
            open_hours: open_hours.into(),
            trust_score,
            commute: commute.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.place.name
    }

    pub fn identity_key(&self) -> Option<&str> {
        self.place.identity_key()
    }

    pub fn distance(&self) -> Option<f64> {
        self.place.distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TraceRole {
    Human,
    Agent,
    Tool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    pub role: TraceRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl TraceEvent {
    fn new(role: TraceRole, name: Option<String>, content: impl Into<String>) -> Self {
        Self {
            role,
            name,
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::new(TraceRole::Human, None, content)
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(TraceRole::Agent, None, content)
    }

    pub fn tool(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(TraceRole::Tool, Some(name.into()), content)
    }
}
