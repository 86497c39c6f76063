use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::prompts::{build_parse_prompt, build_relax_prompt, PARSE_SYSTEM_PROMPT, RELAX_SYSTEM_PROMPT};
use crate::core::error::Result;
use crate::llm::providers::base::LlmProvider;

/// What the model said about a query. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryInsight {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub raw: String,
    pub insight: Option<QueryInsight>,
}

/// Wraps the model calls the pipeline makes: auxiliary parsing and relaxation.
pub struct QueryAssistant {
    llm: Arc<dyn LlmProvider>,
}

impl QueryAssistant {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    pub fn provider_name(&self) -> &str {
        self.llm.provider_name()
    }

    pub async fn parse(&self, query: &str) -> Result<ParseOutcome> {
        let (raw, _metadata) = self
            .llm
            .generate(PARSE_SYSTEM_PROMPT, &build_parse_prompt(query), Some("json_object"))
            .await?;
        let raw = raw.trim().to_string();
        let insight = parse_insight(&raw);
        if insight.is_none() {
            warn!("Failed to parse query insight: {}", crate::safe_truncate(&raw, 200));
        }
        Ok(ParseOutcome { raw, insight })
    }

    /// `Ok(None)` when the model answered with nothing usable.
    pub async fn relax(&self, original_query: &str) -> Result<Option<String>> {
        let (raw, _metadata) = self
            .llm
            .generate(RELAX_SYSTEM_PROMPT, &build_relax_prompt(original_query), None)
            .await?;
        let relaxed = clean_relaxed_query(&raw);
        debug!("Relaxed query: {:?}", relaxed);
        Ok(relaxed)
    }
}

fn parse_insight(content: &str) -> Option<QueryInsight> {
    let json_str = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    };
    serde_json::from_str(json_str).ok()
}

fn clean_relaxed_query(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let cleaned = line.trim_matches(|c| c == '"' || c == '\'' || c == '`').trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
