// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Case and accent folding for matching.
//!
//! Unlike a tokenizer's normalizer this never collapses whitespace: the bitap
//! scorer cares where in a field a match starts, so character positions have
//! to survive folding.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Fold a single character for case-insensitive comparison.
///
/// Takes the first character of the lowercase mapping, so folding is always
/// one-to-one. That's what lets the highlighter compare raw text against the
/// raw query position by position.
#[inline]
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Fold a string for matching: lowercase, and optionally strip diacritics.
///
/// - "Rust Ownership" → "rust ownership"
/// - "Café" → "café" (or "cafe" with `strip_diacritics`)
pub fn fold(value: &str, strip_diacritics: bool) -> String {
    if strip_diacritics {
        strip_marks(value).chars().map(fold_char).collect()
    } else {
        value.chars().map(fold_char).collect()
    }
}

/// NFD decompose and drop combining marks.
#[cfg(feature = "unicode-normalization")]
fn strip_marks(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Without unicode-normalization (lean WASM builds) input is taken as-is.
#[cfg(not(feature = "unicode-normalization"))]
fn strip_marks(value: &str) -> String {
    value.to_string()
}

/// Combining marks (Unicode category Mn) in the blocks that show up in
/// Latin-script blog content.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
