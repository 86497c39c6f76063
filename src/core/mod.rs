pub mod config;
pub mod error;
pub mod geo;
pub mod state;
pub mod types;

pub use config::{DirectoryBackend, SearchConfig, TrustBackend};
pub use error::{Result, SearchError};
pub use geo::Coordinates;
pub use state::{RunState, StateUpdate};
pub use types::{Domain, EnrichedPlace, Place, TraceEvent, TraceRole};
