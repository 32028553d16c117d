// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for bitap field scoring.
//!
//! Any pattern against any text, including patterns longer than a machine
//! word. Scores must be finite, within [0, 1], deterministic, and zero only
//! for identical strings. Long patterns average their chunks, so a partial
//! match may land above the threshold; the engine filters those.

#![no_main]

use arbitrary::Arbitrary;
use gleaner::search::{BitapOptions, BitapPattern};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    pattern: &'a str,
    text: &'a str,
    location: u8,
    distance: u8,
    threshold_pct: u8,
}

fuzz_target!(|input: Input| {
    // Cap lengths to keep each run fast
    let pattern: String = input.pattern.chars().take(80).collect();
    let text: String = input.text.chars().take(400).collect();

    let options = BitapOptions {
        location: usize::from(input.location),
        distance: usize::from(input.distance),
        threshold: f64::from(input.threshold_pct % 101) / 100.0,
        min_match_len: 2,
    };
    let bitap = BitapPattern::new(&pattern, options);

    let first = bitap.search_in(&text);
    let second = bitap.search_in(&text);

    // INVARIANT 1: deterministic
    assert_eq!(first, second, "score changed between runs");

    if let Some(score) = first {
        // INVARIANT 2: finite and in range
        assert!(score.is_finite(), "non-finite score {}", score);
        assert!(score >= 0.0, "negative score {}", score);
        assert!(score <= 1.0, "score {} above 1", score);

        // INVARIANT 3: zero only for identical text
        if score == 0.0 {
            assert_eq!(pattern, text, "zero score for non-identical text");
        }
    }
});
