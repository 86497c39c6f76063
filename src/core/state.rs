use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Domain, EnrichedPlace, Place, TraceEvent};

/// Mutable state of a single query execution. Owned by one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: Uuid,
    pub original_query: String,
    pub domain: Domain,
    pub working_query: String,
    pub user_location: String,
    pub candidates: Vec<Place>,
    pub enriched: Vec<EnrichedPlace>,
    pub filtered: Vec<EnrichedPlace>,
    pub ranked: Vec<EnrichedPlace>,
    pub final_results: Vec<EnrichedPlace>,
    pub trace: Vec<TraceEvent>,
    pub relax_count: u32,
    pub retrieval_attempts: u32,
}

/// The fields a stage is allowed to write. Each variant belongs to exactly one stage.
#[derive(Debug, Clone)]
pub enum StateUpdate {
    Parsed { domain: Domain },
    Expanded { working_query: String },
    Retrieved { candidates: Vec<Place> },
    Enriched { enriched: Vec<EnrichedPlace> },
    Filtered { filtered: Vec<EnrichedPlace> },
    Ranked { ranked: Vec<EnrichedPlace> },
    Relaxed { working_query: String },
    Finalized { final_results: Vec<EnrichedPlace> },
}

impl RunState {
    pub fn new(original_query: impl Into<String>, user_location: impl Into<String>) -> Self {
        let original_query = original_query.into();
        Self {
            run_id: Uuid::new_v4(),
            working_query: original_query.clone(),
            trace: vec![TraceEvent::human(original_query.clone())],
            original_query,
            domain: Domain::Unknown,
            user_location: user_location.into(),
            candidates: Vec::new(),
            enriched: Vec::new(),
            filtered: Vec::new(),
            ranked: Vec::new(),
            final_results: Vec::new(),
            relax_count: 0,
            retrieval_attempts: 0,
        }
    }

    pub fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::Parsed { domain } => {
                self.domain = domain;
                self.working_query = self.original_query.clone();
            }
            StateUpdate::Expanded { working_query } => {
                self.working_query = working_query;
            }
            StateUpdate::Retrieved { candidates } => {
                self.candidates = candidates;
                self.retrieval_attempts += 1;
            }
            StateUpdate::Enriched { enriched } => {
                self.enriched = enriched;
            }
            StateUpdate::Filtered { filtered } => {
                self.filtered = filtered;
            }
            StateUpdate::Ranked { ranked } => {
                self.ranked = ranked;
            }
            StateUpdate::Relaxed { working_query } => {
                self.working_query = working_query;
                self.relax_count += 1;
            }
            StateUpdate::Finalized { final_results } => {
                self.final_results = final_results;
            }
        }
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.trace.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TraceRole;

    #[test]
    fn test_new_state_records_human_query() {
        let state = RunState::new("find a doctor", "current location");
        assert_eq!(state.working_query, "find a doctor");
        assert_eq!(state.domain, Domain::Unknown);
        assert_eq!(state.trace.len(), 1);
        assert_eq!(state.trace[0].role, TraceRole::Human);
    }

    #[test]
    fn test_parsed_resets_working_query() {
        let mut state = RunState::new("cafe", "here");
        state.working_query = "something else".into();
        state.apply(StateUpdate::Parsed { domain: Domain::Generic });
        assert_eq!(state.domain, Domain::Generic);
        assert_eq!(state.working_query, "cafe");
    }

    #[test]
    fn test_relaxed_increments_counter() {
        let mut state = RunState::new("cafe", "here");
        state.apply(StateUpdate::Relaxed { working_query: "coffee".into() });
        state.apply(StateUpdate::Relaxed { working_query: "drinks".into() });
        assert_eq!(state.relax_count, 2);
        assert_eq!(state.working_query, "drinks");
        assert_eq!(state.original_query, "cafe");
    }

    #[test]
    fn test_retrieved_counts_attempts() {
        let mut state = RunState::new("cafe", "here");
        state.apply(StateUpdate::Retrieved { candidates: vec![Place::new("A", "", None)] });
        state.apply(StateUpdate::Retrieved { candidates: Vec::new() });
        assert_eq!(state.retrieval_attempts, 2);
        assert!(state.candidates.is_empty());
    }
}
