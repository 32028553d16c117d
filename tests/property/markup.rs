//! Markup stripping and escaping invariants.

use gleaner::build::{encode_index, strip_markup};
use gleaner::service::parse_index;
use gleaner::{find_spans, highlight, SearchIndex, SearchRecord};
use proptest::prelude::*;

/// HTML-ish text: tags, entities, stray brackets and multi-byte runs.
fn html_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::string::string_regex("[a-z ]{1,8}").unwrap(),
            prop::string::string_regex("<[a-z/ =\"]{0,6}>").unwrap(),
            prop::string::string_regex("&[a-z#0-9]{0,5};").unwrap(),
            Just("<".to_string()),
            Just(">".to_string()),
            Just("&".to_string()),
            Just(";".to_string()),
            Just("\n\t".to_string()),
            Just("소유권".to_string()),
            Just("café".to_string()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

fn record_strategy() -> impl Strategy<Value = SearchRecord> {
    (
        "[A-Za-z가-힣 ]{1,20}",
        "[A-Za-z ]{0,30}",
        "[a-z ]{0,60}",
        "/[a-z0-9/-]{1,12}",
        prop::collection::vec("[a-z]{1,6}", 0..4),
        prop::sample::select(vec!["posts", "notes", "page"]),
        (0u32..2_000_000_000).prop_map(f64::from),
    )
        .prop_map(|(title, description, content, url, tags, section, date)| SearchRecord {
            title,
            description,
            content,
            url,
            tags,
            section: section.to_string(),
            date,
        })
}

proptest! {
    #[test]
    fn prop_strip_is_idempotent(html in html_strategy()) {
        let once = strip_markup(&html);
        prop_assert_eq!(strip_markup(&once), once.clone());
    }

    #[test]
    fn prop_strip_output_is_collapsed(html in html_strategy()) {
        let text = strip_markup(&html);
        prop_assert_eq!(text.trim(), text.as_str());
        prop_assert!(!text.contains("  "));
        prop_assert!(!text.contains('\n'));
    }

    #[test]
    fn prop_highlight_never_leaks_markup(text in html_strategy(), query in html_strategy()) {
        let html = highlight(&text, &find_spans(&text, &query));
        let without_marks = html.replace("<mark>", "").replace("</mark>", "");
        prop_assert!(!without_marks.contains('<'));
        prop_assert!(!without_marks.contains('>'));
    }

    #[test]
    fn prop_index_json_round_trip(records in prop::collection::vec(record_strategy(), 0..8)) {
        let index = SearchIndex::new(records);
        let bytes = encode_index(&index).unwrap();
        let parsed = parse_index(&bytes).unwrap();
        prop_assert_eq!(parsed, index);
    }
}
