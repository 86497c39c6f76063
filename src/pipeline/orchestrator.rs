use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::json;
use strum::IntoStaticStr;
use tracing::{debug, info, info_span, warn, Instrument};

use super::cache::RetrievalCache;
use super::dedupe::dedupe_places;
use super::domains::{classify_domain, DomainProfile, DomainRegistry};
use super::policy::{decide_relax, RelaxDecision};
use super::ranking::rank_places;
use crate::core::config::{DirectoryBackend, SearchConfig, TrustBackend};
use crate::core::error::{Result, SearchError};
use crate::core::geo::Coordinates;
use crate::core::state::{RunState, StateUpdate};
use crate::core::types::{EnrichedPlace, Place, TraceEvent};
use crate::llm::assistant::QueryAssistant;
use crate::llm::factory::LlmProviderFactory;
use crate::llm::providers::base::LlmProvider;
use crate::tools::base::{commute_error, hours_unavailable, CommuteLookup, HoursLookup, PlaceSearch, TrustAssessor};
use crate::tools::google::{GoogleCommute, GoogleHours, GoogleMapsClient, GooglePlaces};
use crate::tools::stub::{StubCommute, StubDirectory, StubHours};
use crate::tools::trust::{FixedTrust, RatingTrust};
use crate::DEFAULT_MAX_RELAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    ParseDomain,
    ExpandQuery,
    Retrieve,
    Enrich,
    Filter,
    Rank,
    Relax,
    Postprocess,
    Done,
}

#[derive(Clone)]
pub struct Collaborators {
    pub places: Arc<dyn PlaceSearch>,
    pub hours: Arc<dyn HoursLookup>,
    pub commute: Arc<dyn CommuteLookup>,
    pub trust: Arc<dyn TrustAssessor>,
}

impl Collaborators {
    pub fn stub() -> Self {
        Self {
            places: Arc::new(StubDirectory),
            hours: Arc::new(StubHours),
            commute: Arc::new(StubCommute),
            trust: Arc::new(FixedTrust::default()),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let trust: Arc<dyn TrustAssessor> = match config.effective_trust_backend() {
            TrustBackend::Rating => Arc::new(RatingTrust),
            TrustBackend::Fixed => Arc::new(FixedTrust::new(config.fixed_trust_score)),
        };

        match config.directory_backend {
            DirectoryBackend::Stub => Ok(Self { trust, ..Self::stub() }),
            DirectoryBackend::Google => {
                let timeout = config.call_timeout();
                let maps = GoogleMapsClient::new(config.google_maps_api_key.clone(), timeout)?;
                let distance = GoogleMapsClient::new(config.commute_api_key().map(String::from), timeout)?;
                Ok(Self {
                    places: Arc::new(GooglePlaces::new(maps.clone(), config.max_places)),
                    hours: Arc::new(GoogleHours::new(maps)),
                    commute: Arc::new(GoogleCommute::new(distance, &config.travel_mode, &config.units)),
                    trust,
                })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub max_relax: u32,
    pub call_timeout: Duration,
    pub concurrent_enrichment: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_relax: DEFAULT_MAX_RELAX,
            call_timeout: Duration::from_secs(10),
            concurrent_enrichment: false,
        }
    }
}

impl PipelineSettings {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            max_relax: config.max_relax,
            call_timeout: config.call_timeout(),
            concurrent_enrichment: config.concurrent_enrichment,
        }
    }
}

/// Drives one query through parse, expand, retrieve, enrich, filter and rank,
/// looping back through relaxation while nothing survives filtering.
/// Every stage yields a well-typed update, so a run always reaches `Done`.
pub struct SearchPipeline {
    collaborators: Collaborators,
    registry: Arc<DomainRegistry>,
    cache: Arc<RetrievalCache>,
    assistant: Option<QueryAssistant>,
    settings: PipelineSettings,
}

impl SearchPipeline {
    pub fn new(collaborators: Collaborators, cache: Arc<RetrievalCache>, settings: PipelineSettings) -> Self {
        Self {
            collaborators,
            registry: Arc::new(DomainRegistry::with_builtins()),
            cache,
            assistant: None,
            settings,
        }
    }

    pub fn from_config(config: &SearchConfig, cache: Arc<RetrievalCache>) -> Result<Self> {
        config.validate()?;
        let llm = LlmProviderFactory::from_config(config)?;
        Ok(
            Self::new(Collaborators::from_config(config)?, cache, PipelineSettings::from_config(config))
                .with_llm(llm),
        )
    }

    pub fn with_llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        info!("Search pipeline using LLM provider {}/{}", llm.provider_name(), llm.model_name());
        self.assistant = Some(QueryAssistant::new(llm));
        self
    }

    pub fn with_registry(mut self, registry: Arc<DomainRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn cache(&self) -> &Arc<RetrievalCache> {
        &self.cache
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub async fn run(&self, query: &str, user_location: &str) -> RunState {
        let mut state = RunState::new(query, user_location);
        let span = info_span!("search_run", run_id = %state.run_id);

        async {
            info!("Search run started: query={:?}", crate::safe_truncate(query, 100));
            let mut stage = Stage::ParseDomain;
            while stage != Stage::Done {
                let next = self.step(stage, &mut state).await;
                debug!("Stage transition: {} -> {}", <&str>::from(stage), <&str>::from(next));
                stage = next;
            }
            info!(
                "Search run finished: domain={}, results={}, relaxations={}, retrievals={}",
                state.domain,
                state.final_results.len(),
                state.relax_count,
                state.retrieval_attempts
            );
        }
        .instrument(span)
        .await;

        state
    }

    /// Executes one stage against `state` and returns the stage to run next.
    pub async fn step(&self, stage: Stage, state: &mut RunState) -> Stage {
        match stage {
            Stage::ParseDomain => {
                let update = self.parse_domain(state).await;
                state.apply(update);
                Stage::ExpandQuery
            }
            Stage::ExpandQuery => {
                let working_query = self.profile(state).expand(&state.working_query);
                state.apply(StateUpdate::Expanded { working_query });
                Stage::Retrieve
            }
            Stage::Retrieve => {
                let update = self.retrieve(state).await;
                state.apply(update);
                Stage::Enrich
            }
            Stage::Enrich => {
                let update = self.enrich(state).await;
                state.apply(update);
                Stage::Filter
            }
            Stage::Filter => {
                let filtered = self.profile(state).filter(state.enriched.clone());
                state.apply(StateUpdate::Filtered { filtered });
                Stage::Rank
            }
            Stage::Rank => {
                let ranked = rank_places(state.filtered.clone());
                state.apply(StateUpdate::Ranked { ranked });
                self.after_rank(state)
            }
            Stage::Relax => {
                let update = self.relax(state).await;
                state.apply(update);
                Stage::Retrieve
            }
            Stage::Postprocess => {
                let final_results = self.profile(state).postprocess(state.ranked.clone());
                state.apply(StateUpdate::Finalized { final_results });
                Stage::Done
            }
            Stage::Done => Stage::Done,
        }
    }

    fn profile(&self, state: &RunState) -> Arc<dyn DomainProfile> {
        self.registry.resolve_domain(state.domain)
    }

    async fn call<T>(&self, what: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.settings.call_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::Timeout(what.to_string())),
        }
    }

    async fn parse_domain(&self, state: &mut RunState) -> StateUpdate {
        let domain = classify_domain(&state.original_query);
        info!("Classified query as {}", domain);

        if let Some(assistant) = &self.assistant {
            match self.call("query parsing", assistant.parse(&state.original_query)).await {
                Ok(outcome) => {
                    if let Some(hint) = outcome.insight.as_ref().and_then(|i| i.domain.as_deref()) {
                        if !hint.eq_ignore_ascii_case(domain.tag()) {
                            debug!("Model suggested domain {:?}, keeping keyword match {}", hint, domain);
                        }
                    }
                    state.record(TraceEvent::agent(outcome.raw));
                }
                Err(e) => {
                    warn!("Query parsing via {} failed: {}", assistant.provider_name(), e);
                    state.record(TraceEvent::tool("parse_query", format!("Error: {e}")));
                }
            }
        }

        StateUpdate::Parsed { domain }
    }

    async fn retrieve(&self, state: &mut RunState) -> StateUpdate {
        let query = state.working_query.clone();
        let tool = self.collaborators.places.name().to_string();

        let (places, cached) = match self.cache.get(&query) {
            Some(places) => {
                debug!("Retrieval cache hit for {:?}", query);
                (places, true)
            }
            None => match self.call("place search", self.collaborators.places.search(&query)).await {
                Ok(places) => {
                    self.cache.put(&query, places.clone());
                    (places, false)
                }
                Err(e) => {
                    warn!("Place search for {:?} failed: {}", query, e);
                    state.record(TraceEvent::tool(&tool, format!("Error: {e}")));
                    return StateUpdate::Retrieved { candidates: Vec::new() };
                }
            },
        };

        let candidates = with_derived_distance(places, Coordinates::parse(&state.user_location));
        let summary = json!({
            "query": query,
            "cached": cached,
            "count": candidates.len(),
            "places": candidates.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        });
        state.record(TraceEvent::tool(tool, summary.to_string()));
        info!("Retrieved {} candidates (cached={})", candidates.len(), cached);

        StateUpdate::Retrieved { candidates }
    }

    async fn enrich(&self, state: &mut RunState) -> StateUpdate {
        let origin = state.user_location.as_str();
        let results: Vec<(EnrichedPlace, Vec<String>)> = if self.settings.concurrent_enrichment {
            join_all(state.candidates.iter().map(|place| self.enrich_place(place, origin))).await
        } else {
            let mut results = Vec::with_capacity(state.candidates.len());
            for place in &state.candidates {
                results.push(self.enrich_place(place, origin).await);
            }
            results
        };

        let mut enriched = Vec::with_capacity(results.len());
        for (place, diagnostics) in results {
            for diagnostic in diagnostics {
                state.record(TraceEvent::tool("enrich", diagnostic));
            }
            enriched.push(place);
        }

        let before = enriched.len();
        let enriched = dedupe_places(enriched);
        if enriched.len() < before {
            debug!("Dropped {} duplicate places", before - enriched.len());
        }
        StateUpdate::Enriched { enriched }
    }

    /// Lookup failures degrade to sentinel fields and are reported as diagnostics.
    async fn enrich_place(&self, place: &Place, origin: &str) -> (EnrichedPlace, Vec<String>) {
        let mut diagnostics = Vec::new();
        let name = place.name.as_str();

        let open_hours = match self.call("hours lookup", self.collaborators.hours.hours(name)).await {
            Ok(hours) => hours,
            Err(e) => {
                warn!("Hours lookup for {:?} failed: {}", name, e);
                diagnostics.push(format!("hours for '{name}': {e}"));
                hours_unavailable(&e)
            }
        };

        let commute = match self.call("commute lookup", self.collaborators.commute.commute(name, origin)).await {
            Ok(commute) => commute,
            Err(e) => {
                warn!("Commute lookup for {:?} failed: {}", name, e);
                diagnostics.push(format!("commute for '{name}': {e}"));
                commute_error(&e)
            }
        };

        let trust_score = match self.call("trust assessment", self.collaborators.trust.trust(place)).await {
            Ok(score) if score.is_finite() => Some(score.clamp(0.0, 1.0) + 0.0),
            Ok(score) => {
                diagnostics.push(format!("trust for '{name}': non-finite score {score}"));
                None
            }
            Err(e) => {
                warn!("Trust assessment for {:?} failed: {}", name, e);
                diagnostics.push(format!("trust for '{name}': {e}"));
                None
            }
        };

        (EnrichedPlace::new(place.clone(), open_hours, trust_score, commute), diagnostics)
    }

    fn after_rank(&self, state: &mut RunState) -> Stage {
        match decide_relax(&state.filtered, state.relax_count, self.settings.max_relax) {
            RelaxDecision::Relax => Stage::Relax,
            RelaxDecision::End => {
                if state.filtered.is_empty() {
                    warn!(
                        "Relaxation limit reached after {} retries with no results",
                        state.relax_count
                    );
                    state.record(TraceEvent::agent(format!(
                        "No results after {} relaxation(s); giving up.",
                        state.relax_count
                    )));
                }
                Stage::Postprocess
            }
        }
    }

    async fn relax(&self, state: &mut RunState) -> StateUpdate {
        let fallback = state.working_query.clone();

        let working_query = match &self.assistant {
            Some(assistant) => match self.call("query relaxation", assistant.relax(&state.original_query)).await {
                Ok(Some(relaxed)) => {
                    state.record(TraceEvent::agent(relaxed.clone()));
                    relaxed
                }
                Ok(None) => {
                    warn!("Model returned an empty relaxed query, reusing {:?}", fallback);
                    fallback
                }
                Err(e) => {
                    warn!("Query relaxation failed: {}, reusing {:?}", e, fallback);
                    state.record(TraceEvent::tool("relax_query", format!("Error: {e}")));
                    fallback
                }
            },
            None => {
                debug!("No LLM configured, reusing {:?}", fallback);
                fallback
            }
        };

        info!("Relaxation {} -> {:?}", state.relax_count + 1, working_query);
        StateUpdate::Relaxed { working_query }
    }
}

/// Haversine distance from `origin` for places with coordinates and no distance yet.
pub fn with_derived_distance(places: Vec<Place>, origin: Option<Coordinates>) -> Vec<Place> {
    let Some(origin) = origin else {
        return places;
    };
    places
        .into_iter()
        .map(|mut place| {
            if place.distance.is_none() {
                if let (Some(lat), Some(lng)) = (place.lat, place.lng) {
                    place.distance = Some(origin.haversine_km(&Coordinates { lat, lng }));
                }
            }
            place
        })
        .collect()
}
