// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for markup stripping and highlighting.
//!
//! Stripping must be idempotent and leave collapsed whitespace. Highlighting
//! the stripped text against any query must never emit markup other than
//! `<mark>`.

#![no_main]

use gleaner::build::strip_markup;
use gleaner::{find_spans, highlight};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    let (html, query) = input;

    let text = strip_markup(html);

    // INVARIANT 1: a second pass changes nothing
    assert_eq!(strip_markup(&text), text, "strip_markup not idempotent on {:?}", html);

    // INVARIANT 2: no leading, trailing or repeated whitespace
    assert_eq!(text.trim(), text);
    assert!(!text.contains("  "), "whitespace not collapsed: {:?}", text);

    // INVARIANT 3: spans stay in bounds and never overlap
    let spans = find_spans(&text, query);
    let char_len = text.chars().count();
    let mut cursor = 0;
    for span in &spans {
        assert!(span.start >= cursor, "overlapping spans: {:?}", spans);
        assert!(span.end() <= char_len, "span past end: {:?}", span);
        cursor = span.end();
    }

    // INVARIANT 4: only <mark> survives escaping
    let html_out = highlight(&text, &spans);
    let bare = html_out.replace("<mark>", "").replace("</mark>", "");
    assert!(!bare.contains('<') && !bare.contains('>'), "markup leaked: {:?}", html_out);
});
