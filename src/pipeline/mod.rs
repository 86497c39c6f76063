pub mod cache;
pub mod dedupe;
pub mod domains;
pub mod orchestrator;
pub mod policy;
pub mod ranking;


pub use cache::{CacheStats, RetrievalCache};
pub use dedupe::dedupe_places;
pub use domains::{classify_domain, DomainProfile, DomainRegistry, GenericDomain, HealthcareDomain};
pub use orchestrator::{with_derived_distance, Collaborators, PipelineSettings, SearchPipeline, Stage};
pub use policy::{decide_relax, RelaxDecision};
pub use ranking::rank_places;
