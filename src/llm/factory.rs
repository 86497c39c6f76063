use std::sync::Arc;
use std::time::Duration;

use super::providers::base::LlmProvider;
use super::providers::fallback::LlmProviderWithFallback;
use super::providers::ollama::OllamaProvider;
use super::providers::openai::OpenAiProvider;
use crate::core::config::SearchConfig;
use crate::core::error::{Result, SearchError};
use crate::DEFAULT_OLLAMA_URL;

pub struct LlmProviderFactory;

impl LlmProviderFactory {
    pub fn create(
        provider: &str,
        model: &str,
        api_key: Option<&str>,
        base_url: Option<&str>,
        temperature: f64,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmProvider>> {
        match provider {
            "openai" => Ok(Arc::new(OpenAiProvider::new(
                api_key.map(String::from),
                base_url.map(String::from),
                model,
                temperature,
                timeout,
            )?)),
            "ollama" => Ok(Arc::new(OllamaProvider::new(
                base_url.unwrap_or(DEFAULT_OLLAMA_URL),
                model,
                temperature,
                timeout,
            )?)),
            other => Err(SearchError::Configuration(format!(
                "Unknown LLM provider: {other}. Supported: openai, ollama"
            ))),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Result<Arc<dyn LlmProvider>> {
        let timeout = config.call_timeout();
        let primary = Self::create(
            &config.llm_provider,
            &config.llm_model,
            config.llm_api_key.as_deref(),
            config.llm_base_url.as_deref(),
            config.llm_temperature,
            timeout,
        )?;

        if !config.llm_fallback_enabled {
            return Ok(primary);
        }

        let fallback = Arc::new(OllamaProvider::new(
            config.llm_fallback_url.clone(),
            config.llm_fallback_model.clone(),
            config.llm_temperature,
            timeout,
        )?);
        Ok(Arc::new(LlmProviderWithFallback::new(primary, fallback)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_provider() {
        let provider =
            LlmProviderFactory::create("openai", "gpt-4o-mini", Some("k"), None, 0.0, Duration::from_secs(5)).unwrap();
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.model_name(), "gpt-4o-mini");
    }

    #[test]
    fn test_create_ollama_provider() {
        let provider =
            LlmProviderFactory::create("ollama", "llama3.2", None, None, 0.0, Duration::from_secs(5)).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
    }

    #[test]
    fn test_unknown_provider_is_configuration_error() {
        let result = LlmProviderFactory::create("unknown", "m", None, None, 0.0, Duration::from_secs(5));
        assert!(matches!(result, Err(SearchError::Configuration(_))));
    }

    #[test]
    fn test_from_config_wraps_fallback() {
        let config = SearchConfig {
            llm_fallback_enabled: true,
            ..Default::default()
        };
        let provider = LlmProviderFactory::from_config(&config).unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }
}
