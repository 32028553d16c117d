// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Literal match spans for highlighting.
//!
//! Ranking is fuzzy, highlighting is not. A result that ranked on "ownrship"
//! gets no highlight at all, while "owner" lights up inside "Ownership". This
//! is a plain left-to-right scan for every case-insensitive occurrence of the
//! whole query, non-overlapping, on the raw (unescaped) text.
//!
//! Spans are in characters. The renderer escapes each segment separately, so
//! nothing in the query ever becomes part of a pattern or of the markup.

use crate::types::MatchSpan;
use crate::util::normalize::fold_char;

/// Every case-insensitive, non-overlapping occurrence of `query` in `text`.
pub fn find_spans(text: &str, query: &str) -> Vec<MatchSpan> {
    let needle: Vec<char> = query.chars().map(fold_char).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let hay: Vec<char> = text.chars().map(fold_char).collect();
    if needle.len() > hay.len() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        if hay[i..i + needle.len()] == needle[..] {
            spans.push(MatchSpan::new(i, needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    spans
}
