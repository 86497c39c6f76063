use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::base::{LlmMetadata, LlmProvider, LlmProviderError};

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    stream: bool,
    options: OllamaOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

pub struct OllamaProvider {
    base_url: String,
    model: String,
    temperature: f64,
    client: Client,
}

impl OllamaProvider {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f64,
        timeout: Duration,
    ) -> Result<Self, LlmProviderError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmProviderError::Configuration(format!("Failed to build Ollama HTTP client: {e}")))?;
        info!("Ollama provider initialized (model={}, url={})", model, base_url);
        Ok(Self {
            base_url,
            model,
            temperature,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn build_request<'a>(
        &'a self,
        system_prompt: &str,
        user_prompt: &str,
        response_format: Option<&str>,
    ) -> OllamaRequest<'a> {
        OllamaRequest {
            model: &self.model,
            messages: vec![
                OllamaMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                OllamaMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
            },
            format: (response_format == Some("json_object")).then_some("json"),
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        response_format: Option<&str>,
    ) -> Result<(String, LlmMetadata), LlmProviderError> {
        let request = self.build_request(system_prompt, user_prompt, response_format);

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(LlmProviderError::Http)?
            .json::<OllamaResponse>()
            .await?;

        let metadata = LlmMetadata {
            provider: "ollama".to_string(),
            model: self.model.clone(),
            tokens_prompt: Some(response.prompt_eval_count),
            tokens_completion: Some(response.eval_count),
            ..Default::default()
        };

        Ok((response.message.content, metadata))
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> OllamaProvider {
        OllamaProvider::new(base_url, "llama3.2", 0.2, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = provider("http://localhost:11434/");
        assert_eq!(provider.endpoint(), "http://localhost:11434/api/chat");
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model_name(), "llama3.2");
    }

    #[test]
    fn test_json_object_maps_to_json_format() {
        let provider = provider("http://localhost:11434");
        let request = serde_json::to_value(provider.build_request("sys", "user", Some("json_object"))).unwrap();

        assert_eq!(request["format"], "json");
        assert_eq!(request["model"], "llama3.2");
        assert_eq!(request["stream"], false);
        assert_eq!(request["options"]["temperature"], 0.2);
        assert_eq!(request["messages"][0]["role"], "system");
        assert_eq!(request["messages"][0]["content"], "sys");
        assert_eq!(request["messages"][1]["role"], "user");
        assert_eq!(request["messages"][1]["content"], "user");
    }

    #[test]
    fn test_plain_text_request_omits_format() {
        let provider = provider("http://localhost:11434");
        let request = serde_json::to_value(provider.build_request("sys", "user", None)).unwrap();
        assert!(request.get("format").is_none());

        let request = serde_json::to_value(provider.build_request("sys", "user", Some("text"))).unwrap();
        assert!(request.get("format").is_none());
    }

    #[test]
    fn test_response_counts_default_to_zero() {
        let response: OllamaResponse =
            serde_json::from_str(r#"{"message": {"role": "assistant", "content": "cafe"}}"#).unwrap();
        assert_eq!(response.message.content, "cafe");
        assert_eq!(response.prompt_eval_count, 0);
        assert_eq!(response.eval_count, 0);
    }
}
