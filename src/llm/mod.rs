pub mod assistant;
pub mod factory;
pub mod prompts;
pub mod providers;

pub use assistant::{ParseOutcome, QueryAssistant, QueryInsight};
pub use factory::LlmProviderFactory;
pub use providers::{LlmMetadata, LlmProvider, LlmProviderError};
