// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Client-side fuzzy search for statically generated sites.
//!
//! At build time the site's content tree is flattened into a JSON array of
//! `SearchRecord`s. At run time the page fetches that file once, scores every
//! record against the query with a per-field bitap matcher, and renders the
//! ten best hits with the matched characters highlighted.
//!
//! # Architecture
//!
//! ```text
//!  build time                                 run time
//! ┌──────────────┐   search-index.json   ┌───────────────┐
//! │   build/     │──────────────────────▶│   service/    │
//! │ (manifest,   │                       │ (load once,   │
//! │  extract,    │                       │  QueryState)  │
//! │  serialize)  │                       └───────┬───────┘
//! └──────────────┘                               │
//!                                                ▼
//!                 ┌──────────────┐       ┌───────────────┐
//!                 │   search/    │◀──────│  controller   │
//!                 │ (bitap,      │       │ (keys, focus, │
//!                 │  aggregate,  │       │  debounce)    │
//!                 │  spans)      │       └───────┬───────┘
//!                 └──────────────┘               │
//!                                                ▼
//!                                        ┌───────────────┐
//!                                        │   render      │
//!                                        │ (escape, mark,│
//!                                        │  dates)       │
//!                                        └───────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use gleaner::{BytesSource, QueryState, SearchService};
//!
//! let service = SearchService::default();
//! service.load(&BytesSource::new(index_json));
//!
//! let outcome = service.search("ownership");
//! if outcome.state() == QueryState::Results {
//!     for hit in outcome.results() {
//!         println!("{:.3} {}", hit.score, hit.record.title);
//!     }
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod search;
pub mod service;
pub mod types;
pub mod util;

#[cfg(not(target_arch = "wasm32"))]
pub mod build;

#[cfg(feature = "wasm")]
pub mod runtime;

#[doc(hidden)]
pub mod testing;

pub use config::{
    ControllerOptions, DateLocale, FieldWeights, RenderOptions, SearchOptions, StatusMessages,
    WidgetMode,
};
pub use controller::{ControllerEvent, Debouncer, KeyPress, MountPoint, SearchController};
pub use error::{BuildError, BuildResult, ExtractionError, IndexLoadError};
pub use render::{highlight, RenderedResult, Renderer};
pub use search::{find_spans, BitapScorer, FieldScorer, QueryEngine, SubstringScorer};
pub use service::{
    parse_index, BytesSource, FileSource, IndexSource, QueryState, Readiness, SearchOutcome,
    SearchService,
};
pub use types::{Field, MatchResult, MatchSpan, MatchedSpans, SearchIndex, SearchRecord, PAGE_SECTION};
