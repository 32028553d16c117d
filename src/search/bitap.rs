// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bitap (shift-and) approximate substring search with location-aware scoring.
//!
//! Each pattern character gets a bitmask of the positions it occupies. Sliding
//! across the text right to left, bit `m - 1` of the state lights up when the
//! whole pattern has been matched. One state row per allowed error count, with
//! insertion, deletion and substitution transitions folded in from the row
//! above (Wu-Manber).
//!
//! A match is scored on two axes that add up:
//!
//! ```text
//! score = errors / pattern_len  +  |location - match_start| / distance
//! ```
//!
//! So a typo costs `1/m`, and drifting away from the expected location costs
//! `1/distance` per character. With the defaults (location 0, distance 100,
//! threshold 0.3) an exact match has to start within the first 30 characters
//! of a field to count, and every typo eats into that budget.
//!
//! Patterns longer than 32 characters are split into 32-character chunks, each
//! searched on its own, and the chunk scores are averaged.

use std::collections::HashMap;

/// Longest pattern a single state row can hold.
pub const MAX_PATTERN_BITS: usize = 32;

/// Floor for any non-identical match, so only `pattern == text` scores 0.
pub const MIN_MATCH_SCORE: f64 = 0.001;

/// Knobs for a single bitap search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitapOptions {
    pub location: usize,
    pub distance: usize,
    pub threshold: f64,
    pub min_match_len: usize,
}

impl Default for BitapOptions {
    fn default() -> Self {
        Self {
            location: 0,
            distance: 100,
            threshold: 0.3,
            min_match_len: 2,
        }
    }
}

/// Score of a candidate match with `errors` edits starting at `at`.
pub fn match_score(errors: usize, at: usize, expected: usize, distance: usize, pattern_len: usize) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    let proximity = at.abs_diff(expected);
    if distance == 0 {
        return if proximity == 0 { accuracy } else { 1.0 };
    }
    accuracy + proximity as f64 / distance as f64
}

/// One ≤32-character slice of the pattern with its character masks.
#[derive(Debug, Clone)]
struct Chunk {
    chars: Vec<char>,
    alphabet: HashMap<char, u64>,
    start_index: usize,
}

impl Chunk {
    fn new(chars: &[char], start_index: usize) -> Self {
        let len = chars.len();
        let mut alphabet: HashMap<char, u64> = HashMap::with_capacity(len);
        for (i, c) in chars.iter().enumerate() {
            *alphabet.entry(*c).or_insert(0) |= 1u64 << (len - i - 1);
        }
        Self {
            chars: chars.to_vec(),
            alphabet,
            start_index,
        }
    }
}

/// A pattern compiled once and searched against many fields.
///
/// Both pattern and text are expected to be folded already; this module
/// compares characters exactly.
#[derive(Debug, Clone)]
pub struct BitapPattern {
    pattern: Vec<char>,
    chunks: Vec<Chunk>,
    options: BitapOptions,
}

impl BitapPattern {
    pub fn new(pattern: &str, options: BitapOptions) -> Self {
        let chars: Vec<char> = pattern.chars().collect();
        let len = chars.len();
        let mut chunks = Vec::new();

        if len > MAX_PATTERN_BITS {
            let remainder = len % MAX_PATTERN_BITS;
            let end = len - remainder;
            let mut i = 0;
            while i < end {
                chunks.push(Chunk::new(&chars[i..i + MAX_PATTERN_BITS], i));
                i += MAX_PATTERN_BITS;
            }
            if remainder > 0 {
                let start = len - MAX_PATTERN_BITS;
                chunks.push(Chunk::new(&chars[start..], start));
            }
        } else if len > 0 {
            chunks.push(Chunk::new(&chars, 0));
        }

        Self {
            pattern: chars,
            chunks,
            options,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Best admissible score of the pattern inside `text`, or `None`.
    pub fn search_in(&self, text: &str) -> Option<f64> {
        if self.chunks.is_empty() {
            return None;
        }

        let text: Vec<char> = text.chars().collect();
        if text == self.pattern {
            return Some(0.0);
        }

        let mut total = 0.0;
        let mut any_match = false;
        for chunk in &self.chunks {
            match search_chunk(&text, chunk, &self.options) {
                Some(score) => {
                    any_match = true;
                    total += score;
                }
                None => total += 1.0,
            }
        }

        any_match.then(|| total / self.chunks.len() as f64)
    }
}

/// Search one chunk. Returns the best score within threshold.
fn search_chunk(text: &[char], chunk: &Chunk, opts: &BitapOptions) -> Option<f64> {
    let pattern = &chunk.chars;
    let m = pattern.len();
    let n = text.len();
    let location = opts.location + chunk.start_index;
    let expected = location.min(n);
    let score = |errors: usize, at: usize| match_score(errors, at, expected, opts.distance, m);

    let track_runs = opts.min_match_len > 1;
    let mut matched = vec![false; n];
    let mut threshold = opts.threshold;

    // Exact occurrences tighten the threshold before the fuzzy pass starts
    let mut from = expected;
    while let Some(idx) = find_exact(text, pattern, from) {
        threshold = threshold.min(score(0, idx));
        from = idx + m;
        if track_runs {
            matched[idx..idx + m].iter_mut().for_each(|hit| *hit = true);
        }
    }

    let top_bit = 1u64 << (m - 1);
    let mut best: Option<f64> = None;
    let mut last_row: Vec<u64> = Vec::new();
    let mut bin_max = m + n;

    for errors in 0..m {
        // How far from the expected location can a match with this many
        // errors still start and stay within threshold?
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            if score(errors, expected + bin_mid) <= threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let mut start = (expected + 1).saturating_sub(bin_mid).max(1);
        let finish = (expected + bin_mid).min(n) + m;

        let mut row = vec![0u64; finish + 2];
        row[finish + 1] = (1u64 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let at = j - 1;
            let char_mask = text
                .get(at)
                .and_then(|c| chunk.alphabet.get(c))
                .copied()
                .unwrap_or(0);
            if track_runs && at < n {
                matched[at] = char_mask != 0;
            }

            row[j] = ((row[j + 1] << 1) | 1) & char_mask;
            if errors > 0 {
                let above = last_row.get(j).copied().unwrap_or(0);
                let above_next = last_row.get(j + 1).copied().unwrap_or(0);
                row[j] |= ((above_next | above) << 1) | 1 | above_next;
            }

            if row[j] & top_bit != 0 {
                let candidate = score(errors, at);
                if candidate <= threshold {
                    threshold = candidate;
                    best = Some(candidate);
                    if at <= expected {
                        break;
                    }
                    // Don't pass the expected location by more than we are already away
                    start = (2 * expected).saturating_sub(at).max(1);
                }
            }
            j -= 1;
        }

        // Even a perfectly placed match with one more error would lose
        if score(errors + 1, expected) > threshold {
            break;
        }
        last_row = row;
    }

    let best = best?;
    if track_runs && !has_run(&matched, opts.min_match_len) {
        return None;
    }
    Some(best.max(MIN_MATCH_SCORE))
}

/// First literal occurrence of `pattern` in `text` at or after `from`.
fn find_exact(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return None;
    }
    (from..=text.len() - pattern.len()).find(|&i| text[i..i + pattern.len()] == *pattern)
}

/// Is there a run of at least `min_len` consecutive matched characters?
fn has_run(matched: &[bool], min_len: usize) -> bool {
    let mut run = 0;
    for &hit in matched {
        if hit {
            run += 1;
            if run >= min_len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
