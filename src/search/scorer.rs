// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Field scorers: how well does a query match one piece of text?
//!
//! The engine only ever asks one question of a scorer, `score(query, field)`,
//! and gets back a number in `[0, 1]` where 0 is perfect and 1 means "no
//! admissible match". Weighting, thresholding, sorting and highlighting all
//! live in the engine, so swapping the matcher never touches ranking.
//!
//! Both arguments arrive already folded (lowercased, optionally accent
//! stripped).

use super::bitap::{match_score, BitapOptions, BitapPattern};

/// Score reported when a field has no admissible match.
pub const NO_MATCH: f64 = 1.0;

/// Pluggable approximate matcher.
pub trait FieldScorer: Send + Sync {
    /// Score `query` against `field`: 0.0 best, 1.0 no match.
    fn score(&self, query: &str, field: &str) -> f64;

    /// Bind a query once and score many fields with it.
    ///
    /// The default just forwards to `score`. Scorers with per-query setup
    /// (compiling a pattern) override this so the setup runs once per search
    /// instead of once per field.
    fn matcher<'a>(&'a self, query: &'a str) -> Box<dyn Fn(&str) -> f64 + 'a> {
        Box::new(move |field| self.score(query, field))
    }
}

/// Edit-tolerant, location-aware bitap scoring. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitapScorer {
    pub options: BitapOptions,
}

impl BitapScorer {
    pub fn new(options: BitapOptions) -> Self {
        Self { options }
    }
}

impl FieldScorer for BitapScorer {
    fn score(&self, query: &str, field: &str) -> f64 {
        BitapPattern::new(query, self.options)
            .search_in(field)
            .unwrap_or(NO_MATCH)
    }

    fn matcher<'a>(&'a self, query: &'a str) -> Box<dyn Fn(&str) -> f64 + 'a> {
        let pattern = BitapPattern::new(query, self.options);
        Box::new(move |field| pattern.search_in(field).unwrap_or(NO_MATCH))
    }
}

/// Literal substring scoring: no typo tolerance, same location penalty.
///
/// Useful for sites that want predictable "contains" behavior, and as a
/// reference point when tuning the bitap thresholds.
#[derive(Debug, Clone, Copy)]
pub struct SubstringScorer {
    pub location: usize,
    pub distance: usize,
    pub threshold: f64,
}

impl Default for SubstringScorer {
    fn default() -> Self {
        let bitap = BitapOptions::default();
        Self {
            location: bitap.location,
            distance: bitap.distance,
            threshold: bitap.threshold,
        }
    }
}

impl FieldScorer for SubstringScorer {
    fn score(&self, query: &str, field: &str) -> f64 {
        if query.is_empty() {
            return NO_MATCH;
        }
        if query == field {
            return 0.0;
        }
        let Some(byte_idx) = field.find(query) else {
            return NO_MATCH;
        };
        let at = field[..byte_idx].chars().count();
        let len = query.chars().count();
        let score = match_score(0, at, self.location, self.distance, len);
        if score <= self.threshold {
            score.max(super::bitap::MIN_MATCH_SCORE)
        } else {
            NO_MATCH
        }
    }
}
