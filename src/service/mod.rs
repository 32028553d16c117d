// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search service: one index load, then any number of queries.
//!
//! The load outcome sits in a `OnceLock`. Before it is set every query reports
//! `NotReady`; after it is set it never changes, so the engine is shared by
//! every caller without locking. A failed load is terminal for the service's
//! lifetime: the UI keeps saying "not ready" and nothing panics.
//!
//! ```text
//!   Pending ──load ok──▶ Ready
//!      │
//!      └──load err──▶ Unavailable
//! ```

pub mod loader;

use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::SearchOptions;
use crate::error::IndexLoadError;
use crate::search::engine::{default_scorer, QueryEngine};
use crate::search::scorer::FieldScorer;
use crate::types::{MatchResult, SearchIndex};

pub use loader::{parse_index, BytesSource, FileSource, IndexSource};

/// What the UI should show for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryState {
    /// Query shorter than the minimum. Checked before anything else.
    TypeMore,
    /// Index still loading, or failed to load.
    NotReady,
    NoResults,
    Results,
}

/// Where the index load stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Readiness {
    Pending,
    Ready,
    Unavailable,
}

enum LoadOutcome {
    Ready(QueryEngine),
    Unavailable(IndexLoadError),
}

/// Results of one query, already capped, plus the state to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    state: QueryState,
    results: Vec<MatchResult>,
    /// Matches before the cap was applied.
    total_matches: usize,
}

impl SearchOutcome {
    fn empty(state: QueryState) -> Self {
        Self {
            state,
            results: Vec::new(),
            total_matches: 0,
        }
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<MatchResult> {
        self.results
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Owns the index for a session.
pub struct SearchService {
    options: SearchOptions,
    scorer: Arc<dyn FieldScorer>,
    outcome: OnceLock<LoadOutcome>,
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("readiness", &self.readiness())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    pub fn new(options: SearchOptions) -> Self {
        let scorer = default_scorer(&options);
        Self::with_scorer(options, scorer)
    }

    pub fn with_scorer(options: SearchOptions, scorer: Arc<dyn FieldScorer>) -> Self {
        Self {
            options,
            scorer,
            outcome: OnceLock::new(),
        }
    }

    /// A service that is ready from the start.
    pub fn from_index(index: SearchIndex, options: SearchOptions) -> Self {
        let service = Self::new(options);
        let engine = service.engine_for(index);
        let _ = service.outcome.set(LoadOutcome::Ready(engine));
        service
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Fetch and parse the index. Only the first call does anything.
    pub fn load<S: IndexSource + ?Sized>(&self, source: &S) -> Readiness {
        let mut attempted = false;
        self.outcome.get_or_init(|| {
            attempted = true;
            self.resolve(&source.describe(), source.fetch())
        });
        if !attempted {
            warn!(source = %source.describe(), "search index already loaded; ignoring reload");
        }
        self.readiness()
    }

    /// Settle the load with bytes fetched elsewhere (the async browser path).
    #[cfg_attr(not(feature = "wasm"), allow(dead_code))]
    pub(crate) fn finish_load(
        &self,
        origin: &str,
        fetched: Result<Vec<u8>, IndexLoadError>,
    ) -> Readiness {
        let mut attempted = false;
        self.outcome.get_or_init(|| {
            attempted = true;
            self.resolve(origin, fetched)
        });
        if !attempted {
            warn!(source = origin, "search index already loaded; ignoring reload");
        }
        self.readiness()
    }

    fn resolve(&self, origin: &str, fetched: Result<Vec<u8>, IndexLoadError>) -> LoadOutcome {
        match fetched.and_then(|bytes| loader::parse_index(&bytes)) {
            Ok(index) => {
                info!(source = origin, records = index.len(), "search index ready");
                LoadOutcome::Ready(self.engine_for(index))
            }
            Err(e) => {
                error!(source = origin, error = %e, "search index unavailable");
                LoadOutcome::Unavailable(e)
            }
        }
    }

    fn engine_for(&self, index: SearchIndex) -> QueryEngine {
        QueryEngine::with_scorer(index, self.options.clone(), Arc::clone(&self.scorer))
    }

    pub fn readiness(&self) -> Readiness {
        match self.outcome.get() {
            None => Readiness::Pending,
            Some(LoadOutcome::Ready(_)) => Readiness::Ready,
            Some(LoadOutcome::Unavailable(_)) => Readiness::Unavailable,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.readiness() == Readiness::Ready
    }

    /// Why the load failed, if it did.
    pub fn load_error(&self) -> Option<&IndexLoadError> {
        match self.outcome.get() {
            Some(LoadOutcome::Unavailable(e)) => Some(e),
            _ => None,
        }
    }

    pub fn index(&self) -> Option<&SearchIndex> {
        match self.outcome.get() {
            Some(LoadOutcome::Ready(engine)) => Some(engine.index()),
            _ => None,
        }
    }

    /// Run a query and cap the results at `result_limit`.
    pub fn search(&self, query: &str) -> SearchOutcome {
        if query.chars().count() < self.options.min_query_len {
            return SearchOutcome::empty(QueryState::TypeMore);
        }
        let Some(LoadOutcome::Ready(engine)) = self.outcome.get() else {
            return SearchOutcome::empty(QueryState::NotReady);
        };

        let mut results = engine.search(query);
        let total_matches = results.len();
        if total_matches == 0 {
            return SearchOutcome::empty(QueryState::NoResults);
        }
        results.truncate(self.options.result_limit);
        SearchOutcome {
            state: QueryState::Results,
            results,
            total_matches,
        }
    }
}
