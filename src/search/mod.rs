// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-time matching: field scorers, ranking, and highlight spans.
//!
//! `bitap` does the approximate matching on one string, `scorer` puts a
//! pluggable face on it, `engine` weighs four fields per record into one
//! ranked list, and `highlight` finds the literal spans the renderer marks.

pub mod bitap;
pub mod engine;
pub mod highlight;
pub mod scorer;

pub use bitap::{BitapOptions, BitapPattern};
pub use engine::{aggregate, default_scorer, QueryEngine};
pub use highlight::find_spans;
pub use scorer::{BitapScorer, FieldScorer, SubstringScorer, NO_MATCH};
