// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Browser bindings.
//!
//! The native crate is the source of truth: scoring, state and markup all
//! happen in Rust, and the WASM layer only moves bytes and callbacks across
//! the boundary.

pub mod wasm;

pub use wasm::{SearchClient, SearchWidget};
