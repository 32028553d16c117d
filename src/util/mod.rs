// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility modules for string processing and artifact statistics.
//!
//! Text folding for case- and accent-insensitive matching, plus the size and
//! checksum numbers the CLI prints for a published index.

pub mod normalize;
pub mod stats;
