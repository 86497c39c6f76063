use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use super::error::{Result, SearchError};
use crate::{DEFAULT_MAX_RELAX, DEFAULT_OLLAMA_URL, DEFAULT_USER_LOCATION};

const ENV_PREFIX: &str = "AGENTIC_SEARCH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DirectoryBackend {
    Google,
    Stub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrustBackend {
    Rating,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub llm_provider: String,
    pub llm_model: String,
    pub llm_api_key: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_temperature: f64,

    pub llm_fallback_enabled: bool,
    pub llm_fallback_url: String,
    pub llm_fallback_model: String,

    pub directory_backend: DirectoryBackend,
    pub google_maps_api_key: Option<String>,
    pub distance_matrix_api_key: Option<String>,
    pub travel_mode: String,
    pub units: String,

    /// Unset means rating-based trust for Google and a fixed score for the stub directory.
    pub trust_backend: Option<TrustBackend>,
    pub fixed_trust_score: f64,

    pub max_relax: u32,
    pub call_timeout_secs: u64,
    pub max_places: usize,
    pub concurrent_enrichment: bool,
    pub cache_capacity: Option<usize>,
    pub default_user_location: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            llm_provider: "openai".to_string(),
            llm_model: "gpt-4o-mini".to_string(),
            llm_api_key: None,
            llm_base_url: None,
            llm_temperature: 0.0,

            llm_fallback_enabled: false,
            llm_fallback_url: DEFAULT_OLLAMA_URL.to_string(),
            llm_fallback_model: "llama3.2".to_string(),

            directory_backend: DirectoryBackend::Google,
            google_maps_api_key: None,
            distance_matrix_api_key: None,
            travel_mode: "driving".to_string(),
            units: "metric".to_string(),

            trust_backend: None,
            fixed_trust_score: 0.8,

            max_relax: DEFAULT_MAX_RELAX,
            call_timeout_secs: 10,
            max_places: 10,
            concurrent_enrichment: false,
            cache_capacity: None,
            default_user_location: DEFAULT_USER_LOCATION.to_string(),
        }
    }
}

impl SearchConfig {
    /// Defaults, then the optional TOML file, then `AGENTIC_SEARCH_*` variables,
    /// then the conventional credential variables for anything still unset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None, |key| std::env::var(key).ok())
    }

    /// Defaults and environment only.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    fn load_from(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
        credential: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_credentials(credential);
        config.validate()?;
        Ok(config)
    }

    fn apply_credentials(&mut self, credential: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| credential(key).filter(|v| !v.trim().is_empty());
        if self.llm_api_key.is_none() {
            self.llm_api_key = non_empty("OPENAI_API_KEY");
        }
        if self.google_maps_api_key.is_none() {
            self.google_maps_api_key = non_empty("GOOGLE_MAPS_API_KEY");
        }
        if self.distance_matrix_api_key.is_none() {
            self.distance_matrix_api_key = non_empty("GOOGLE_DISTANCE_MATRIX_API_KEY");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.call_timeout_secs == 0 {
            return Err(SearchError::Configuration("call_timeout_secs must be positive".into()));
        }
        if self.max_places == 0 {
            return Err(SearchError::Configuration("max_places must be positive".into()));
        }
        if self.cache_capacity == Some(0) {
            return Err(SearchError::Configuration("cache_capacity must be positive when set".into()));
        }
        if !(0.0..=1.0).contains(&self.fixed_trust_score) {
            return Err(SearchError::Configuration("fixed_trust_score must be within [0, 1]".into()));
        }
        Ok(())
    }

    pub fn effective_trust_backend(&self) -> TrustBackend {
        self.trust_backend.unwrap_or(match self.directory_backend {
            DirectoryBackend::Google => TrustBackend::Rating,
            DirectoryBackend::Stub => TrustBackend::Fixed,
        })
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    pub fn commute_api_key(&self) -> Option<&str> {
        self.google_maps_api_key
            .as_deref()
            .or(self.distance_matrix_api_key.as_deref())
    }
}
