// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search index.
//!
//! A `SearchRecord` is one searchable unit (a post, an article, a standalone
//! page). A `SearchIndex` is the ordered list of them, published as a single
//! JSON array. A `MatchResult` is what a query hands back: the record, where
//! it sat in the index, how well it matched, and which literal spans the
//! renderer should highlight.
//!
//! # Invariants
//!
//! - **SearchRecord**: `title` is non-empty, `date` is finite.
//!   The extractor enforces both; the serializer refuses a non-finite date.
//!
//! - **SearchIndex**: immutable after construction. Nothing in the query path
//!   takes `&mut SearchIndex`.
//!
//! - **MatchResult**: `0.0 <= score <= 1.0`, and `index` points back into the
//!   index the result came from.

use serde::{Deserialize, Serialize};

// =============================================================================
// RECORDS
// =============================================================================

/// Section marker given to standalone pages.
pub const PAGE_SECTION: &str = "page";

/// One searchable unit of content.
///
/// Field names are the published JSON contract: `title`, `description`,
/// `content`, `url`, `tags`, `section`, `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub section: String,
    /// Unix epoch seconds. Pages carry the build time, not an authored date.
    pub date: f64,
}

/// The full ordered record set, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchIndex {
    pub records: Vec<SearchRecord>,
}

impl SearchIndex {
    pub fn new(records: Vec<SearchRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchRecord> {
        self.records.iter()
    }
}

impl From<Vec<SearchRecord>> for SearchIndex {
    fn from(records: Vec<SearchRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = &'a SearchRecord;
    type IntoIter = std::slice::Iter<'a, SearchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// The four weighted fields every record is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Description,
    Content,
    Tags,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Title, Field::Description, Field::Content, Field::Tags];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Content => "content",
            Field::Tags => "tags",
        }
    }
}

// =============================================================================
// MATCHES
// =============================================================================

/// A highlighted range, in characters (not bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub len: usize,
}

impl MatchSpan {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Literal-occurrence spans for the two highlighted fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedSpans {
    pub title: Vec<MatchSpan>,
    pub description: Vec<MatchSpan>,
}

/// One ranked hit. Produced per query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub record: SearchRecord,
    /// Position of the record in the index (the tie-breaker for equal scores).
    pub index: usize,
    /// 0.0 is a perfect match, 1.0 the worst admissible.
    pub score: f64,
    pub matched_spans: MatchedSpans,
}
