pub mod core;
pub mod llm;
pub mod pipeline;
pub mod tools;
pub mod utils;

pub use utils::{safe_truncate, title_case};

pub use core::config::SearchConfig;
pub use core::error::{Result, SearchError};
pub use core::state::RunState;
pub use core::types::{Domain, EnrichedPlace, Place, TraceEvent, TraceRole};
pub use pipeline::{Collaborators, PipelineSettings, RetrievalCache, SearchPipeline};


pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";


pub const DEFAULT_MAX_RELAX: u32 = 3;


pub const DEFAULT_USER_LOCATION: &str = "current location";
