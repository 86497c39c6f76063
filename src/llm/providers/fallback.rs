use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use super::base::{LlmMetadata, LlmProvider, LlmProviderError};

/// Tries the primary provider first and retries once on the fallback.
pub struct LlmProviderWithFallback {
    primary: Arc<dyn LlmProvider>,
    fallback: Arc<dyn LlmProvider>,
    fallback_count: AtomicUsize,
    primary_failures: AtomicUsize,
}

impl LlmProviderWithFallback {
    pub fn new(primary: Arc<dyn LlmProvider>, fallback: Arc<dyn LlmProvider>) -> Self {
        info!(
            "LlmProviderWithFallback initialized: primary={}/{}, fallback={}/{}",
            primary.provider_name(),
            primary.model_name(),
            fallback.provider_name(),
            fallback.model_name()
        );
        Self {
            primary,
            fallback,
            fallback_count: AtomicUsize::new(0),
            primary_failures: AtomicUsize::new(0),
        }
    }

    pub fn fallback_count(&self) -> usize {
        self.fallback_count.load(Ordering::SeqCst)
    }

    pub fn primary_failures(&self) -> usize {
        self.primary_failures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for LlmProviderWithFallback {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        response_format: Option<&str>,
    ) -> Result<(String, LlmMetadata), LlmProviderError> {
        let err = match self.primary.generate(system_prompt, user_prompt, response_format).await {
            Ok(result) => return Ok(result),
            Err(err) => err,
        };

        let failures = self.primary_failures.fetch_add(1, Ordering::SeqCst) + 1;
        warn!(
            "Primary LLM provider {} failed ({}x), falling back to {}: {}",
            self.primary.provider_name(),
            failures,
            self.fallback.provider_name(),
            err
        );

        let (content, mut metadata) = self.fallback.generate(system_prompt, user_prompt, response_format).await?;
        metadata.fallback_used = true;
        metadata.original_error = Some(err.to_string());
        self.fallback_count.fetch_add(1, Ordering::SeqCst);

        Ok((content, metadata))
    }

    fn provider_name(&self) -> &str {
        self.primary.provider_name()
    }

    fn model_name(&self) -> &str {
        self.primary.model_name()
    }
}
