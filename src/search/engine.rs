// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weighted multi-field fuzzy ranking over an in-memory index.
//!
//! Every record is scored on four fields with a pluggable `FieldScorer`. A
//! field is admissible when its score is within the acceptance threshold;
//! a record needs at least one admissible field. Admissible fields are
//! combined into one aggregate, scaled so it never leaves `[0, threshold]`:
//!
//! ```text
//! aggregate = threshold × Π  (score(field) / threshold) ^ (weight(field) / max_weight)
//! ```
//!
//! The title (heaviest weight, exponent 1) keeps its raw score. Lighter
//! fields are pulled toward the threshold, so they rank below an equally
//! good title match but are never cut. A field without an admissible match
//! contributes the worst factor, 1.0. Two matching fields beat one.
//!
//! | Title match | Content match | Tag match | Aggregate |
//! |-------------|---------------|-----------|-----------|
//! | 0.05        | none          | none      | 0.05      |
//! | none        | 0.05          | none      | 0.12      |
//! | none        | 0.11          | none      | 0.18      |
//! | none        | none          | 0.20      | 0.27      |
//! | 0.05        | 0.05          | none      | 0.02      |
//!
//! Survivors are sorted by ascending score; the sort is stable, so ties keep
//! index order.

use std::sync::Arc;

use tracing::debug;

use super::bitap::BitapOptions;
use super::highlight::find_spans;
use super::scorer::{BitapScorer, FieldScorer, NO_MATCH};
use crate::config::SearchOptions;
use crate::types::{Field, MatchResult, MatchedSpans, SearchIndex, SearchRecord};
use crate::util::normalize::fold;

/// Fields of one record, folded once at load time.
#[derive(Debug, Clone)]
struct FoldedRecord {
    title: String,
    description: String,
    content: String,
    tags: Vec<String>,
}

impl FoldedRecord {
    fn new(record: &SearchRecord, strip_diacritics: bool) -> Self {
        Self {
            title: fold(&record.title, strip_diacritics),
            description: fold(&record.description, strip_diacritics),
            content: fold(&record.content, strip_diacritics),
            tags: record
                .tags
                .iter()
                .map(|t| fold(t, strip_diacritics))
                .collect(),
        }
    }
}

/// Read-only query engine over a loaded index.
pub struct QueryEngine {
    index: Arc<SearchIndex>,
    folded: Vec<FoldedRecord>,
    scorer: Arc<dyn FieldScorer>,
    options: SearchOptions,
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("records", &self.index.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Bitap scorer configured from the engine options.
pub fn default_scorer(options: &SearchOptions) -> Arc<dyn FieldScorer> {
    Arc::new(BitapScorer::new(BitapOptions {
        location: options.location,
        distance: options.distance,
        threshold: options.threshold,
        min_match_len: options.min_match_len,
    }))
}

impl QueryEngine {
    /// Engine with the default bitap scorer.
    pub fn new(index: SearchIndex, options: SearchOptions) -> Self {
        let scorer = default_scorer(&options);
        Self::with_scorer(index, options, scorer)
    }

    /// Engine with a caller-supplied scorer.
    pub fn with_scorer(
        index: SearchIndex,
        options: SearchOptions,
        scorer: Arc<dyn FieldScorer>,
    ) -> Self {
        let folded = index
            .iter()
            .map(|r| FoldedRecord::new(r, options.ignore_diacritics))
            .collect();
        Self {
            index: Arc::new(index),
            folded,
            scorer,
            options,
        }
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Is this query long enough to run?
    pub fn accepts(&self, query: &str) -> bool {
        query.chars().count() >= self.options.min_query_len
    }

    /// Every record within threshold, best first. Not capped.
    ///
    /// Returns nothing for queries shorter than `min_query_len`.
    pub fn search(&self, query: &str) -> Vec<MatchResult> {
        if !self.accepts(query) {
            return Vec::new();
        }

        let folded_query = fold(query, self.options.ignore_diacritics);
        let matcher = self.scorer.matcher(&folded_query);
        let weights = self.options.weights;
        let max_weight = weights.max();

        let mut scored: Vec<(usize, f64)> = self
            .folded
            .iter()
            .enumerate()
            .filter_map(|(idx, rec)| {
                let field_scores = Field::ALL
                    .map(|field| (weights.get(field), field_score(&*matcher, rec, field)));
                aggregate(&field_scores, max_weight, self.options.threshold)
                    .map(|total| (idx, total))
            })
            .collect();

        // Stable: equal scores keep index order
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        debug!(
            query,
            records = self.index.len(),
            matched = scored.len(),
            "search complete"
        );

        scored
            .into_iter()
            .map(|(idx, score)| {
                let record = &self.index.records[idx];
                MatchResult {
                    record: record.clone(),
                    index: idx,
                    score,
                    matched_spans: MatchedSpans {
                        title: find_spans(&record.title, query),
                        description: find_spans(&record.description, query),
                    },
                }
            })
            .collect()
    }
}

/// Score one field. Empty fields never reach the scorer.
fn field_score(matcher: &dyn Fn(&str) -> f64, rec: &FoldedRecord, field: Field) -> f64 {
    let score_text = |text: &str| {
        if text.is_empty() {
            NO_MATCH
        } else {
            matcher(text).clamp(0.0, NO_MATCH)
        }
    };
    match field {
        Field::Title => score_text(&rec.title),
        Field::Description => score_text(&rec.description),
        Field::Content => score_text(&rec.content),
        // Each tag is its own short string; the best one speaks for the field
        Field::Tags => rec
            .tags
            .iter()
            .map(|t| score_text(t))
            .fold(NO_MATCH, f64::min),
    }
}

/// Weighted geometric combination of `(weight, score)` pairs.
///
/// Only fields scoring within `threshold` take part; `None` when there are
/// none. The result lies in `[0, threshold]`. A zero score is lifted to
/// `f64::EPSILON` so a perfect match in a light field still ranks below a
/// perfect match in a heavy one.
pub fn aggregate(field_scores: &[(f64, f64)], max_weight: f64, threshold: f64) -> Option<f64> {
    if max_weight <= 0.0 {
        return None;
    }
    let scale = threshold.max(f64::EPSILON);
    let mut any_admissible = false;
    let product = field_scores
        .iter()
        .filter(|&&(weight, score)| weight > 0.0 && score < NO_MATCH && score <= threshold)
        .map(|&(weight, score)| {
            any_admissible = true;
            let ratio = (score.max(f64::EPSILON) / scale).min(1.0);
            ratio.powf(weight / max_weight)
        })
        .product::<f64>();
    any_admissible.then(|| (scale * product).clamp(0.0, NO_MATCH))
}
