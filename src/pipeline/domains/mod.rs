pub mod generic;
pub mod healthcare;

pub use generic::GenericDomain;
pub use healthcare::{HealthcareDomain, HEALTHCARE_TERMS};

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::core::types::{Domain, EnrichedPlace};

/// Per-domain behaviour plugged into the pipeline. Implementations are pure.
pub trait DomainProfile: Send + Sync {
    fn tag(&self) -> &str;

    fn expand(&self, query: &str) -> String;

    fn filter(&self, places: Vec<EnrichedPlace>) -> Vec<EnrichedPlace> {
        places
    }

    fn postprocess(&self, places: Vec<EnrichedPlace>) -> Vec<EnrichedPlace> {
        places
    }
}

/// Maps domain tags to profiles. Unknown tags always resolve to the generic profile.
pub struct DomainRegistry {
    profiles: HashMap<String, Arc<dyn DomainProfile>>,
    fallback: Arc<dyn DomainProfile>,
}

impl DomainRegistry {
    pub fn empty() -> Self {
        Self {
            profiles: HashMap::new(),
            fallback: Arc::new(GenericDomain),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(GenericDomain));
        registry.register(Arc::new(HealthcareDomain));
        registry
    }

    /// Replaces any profile already registered under the same tag.
    pub fn register(&mut self, profile: Arc<dyn DomainProfile>) {
        self.profiles.insert(profile.tag().to_string(), profile);
    }

    pub fn resolve(&self, tag: &str) -> Arc<dyn DomainProfile> {
        match self.profiles.get(tag) {
            Some(profile) => Arc::clone(profile),
            None => {
                debug!("No profile for domain {:?}, using generic", tag);
                Arc::clone(&self.fallback)
            }
        }
    }

    pub fn resolve_domain(&self, domain: Domain) -> Arc<dyn DomainProfile> {
        self.resolve(domain.tag())
    }

    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Healthcare iff any vocabulary term occurs in the query, case-insensitively.
pub fn classify_domain(query: &str) -> Domain {
    let lower = query.to_lowercase();
    if HEALTHCARE_TERMS.iter().any(|term| lower.contains(term)) {
        Domain::Healthcare
    } else {
        Domain::Generic
    }
}
