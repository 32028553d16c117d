// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for loading a search index from untrusted bytes.
//!
//! The index is fetched over the network, so its bytes are not ours. Parsing
//! must fail cleanly, never panic, and a parsed index must survive a search
//! and a render.

#![no_main]

use gleaner::{BytesSource, QueryState, Readiness, Renderer, SearchService};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let service = SearchService::default();
    let readiness = service.load(&BytesSource::new(data));

    // INVARIANT 1: loading settles, one way or the other
    assert_ne!(readiness, Readiness::Pending);

    if readiness == Readiness::Unavailable {
        assert!(service.load_error().is_some());
        assert_eq!(service.search("rust").state(), QueryState::NotReady);
        return;
    }

    // INVARIANT 2: a parsed index re-serializes
    let index = service.index().expect("ready service has an index");
    let json = serde_json::to_vec(index).expect("index re-serializes");
    assert!(json.starts_with(b"["));

    // INVARIANT 3: searching and rendering never panic
    let renderer = Renderer::default();
    for query in ["ru", "rust", "<b>", "소유권"] {
        let outcome = service.search(query);
        assert!(outcome.results().len() <= 10);
        let _ = renderer.render_html(outcome.results());
    }
});
