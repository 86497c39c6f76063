use thiserror::Error;

use crate::llm::providers::base::LlmProviderError;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{service} returned an error: {message}")]
    Service { service: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0} timed out")]
    Timeout(String),

    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmProviderError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    pub fn service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            service: service.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
