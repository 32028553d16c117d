//! Ranking: ascending aggregate score, stable ties, weights and threshold.

use crate::common::{blog_corpus, make_record_full, ready_service};
use gleaner::{FieldWeights, QueryState, SearchIndex, SearchOptions, SearchService};

#[test]
fn test_results_sorted_ascending_and_within_threshold() {
    let service = ready_service(blog_corpus(60));
    for query in ["rust", "ownership", "async", "bitap", "memory layout"] {
        let outcome = service.search(query);
        let scores: Vec<f64> = outcome.results().iter().map(|r| r.score).collect();
        assert!(
            scores.windows(2).all(|w| w[0] <= w[1]),
            "{:?} not sorted: {:?}",
            query,
            scores
        );
        assert!(scores.iter().all(|s| *s <= 0.3), "{:?}: {:?}", query, scores);
    }
}

#[test]
fn test_title_match_beats_content_match() {
    let index = SearchIndex::new(vec![
        make_record_full("Unrelated", "", "bitap matching", "/content", &[]),
        make_record_full("Bitap Matching", "", "", "/title", &[]),
    ]);
    let outcome = ready_service(index).search("bitap");
    let urls: Vec<&str> = outcome.results().iter().map(|r| r.record.url.as_str()).collect();
    assert_eq!(urls, vec!["/title", "/content"]);
}

#[test]
fn test_equal_scores_keep_index_order() {
    let index = SearchIndex::new(
        (0..6)
            .map(|i| make_record_full("Same Title", "", "", &format!("/p/{}", i), &[]))
            .collect(),
    );
    let outcome = ready_service(index).search("same");
    let positions: Vec<usize> = outcome.results().iter().map(|r| r.index).collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_weights_decide_between_fields() {
    let index = SearchIndex::new(vec![
        make_record_full("Notes", "", "", "/tagged", &["bitap"]),
        make_record_full("Bitap", "", "", "/titled", &[]),
    ]);

    let by_default = ready_service(index.clone()).search("bitap");
    assert_eq!(by_default.results()[0].record.url, "/titled");

    let tag_heavy = SearchOptions {
        weights: FieldWeights {
            title: 0.1,
            description: 0.1,
            content: 0.1,
            tags: 1.0,
        },
        ..SearchOptions::default()
    };
    let by_tags = SearchService::from_index(index, tag_heavy).search("bitap");
    assert_eq!(by_tags.results()[0].record.url, "/tagged");
}

#[test]
fn test_tighter_threshold_drops_distant_matches() {
    let index = SearchIndex::new(vec![make_record_full(
        "Rust Ownership",
        "memory safety",
        "",
        "/p/1",
        &["rust", "memory"],
    )]);

    let loose = ready_service(index.clone()).search("owner");
    assert_eq!(loose.state(), QueryState::Results);

    let strict = SearchOptions {
        threshold: 0.01,
        ..SearchOptions::default()
    };
    let tight = SearchService::from_index(index, strict).search("owner");
    assert_eq!(tight.state(), QueryState::NoResults);
}

#[test]
fn test_every_result_matched_some_field() {
    let service = ready_service(blog_corpus(40));
    let outcome = service.search("tokenizer");
    assert!(!outcome.is_empty());
    for result in outcome.results() {
        assert!(result.score < 1.0);
        assert!(result.score >= 0.0);
    }
}

#[test]
fn test_body_and_tag_matches_are_kept() {
    let cases = [
        ("ownership", make_record_full("Weekly notes", "", "this week: ownership", "/body", &[])),
        ("serda", make_record_full("Weekly notes", "", "", "/typo-tag", &["serde"])),
        ("runtime", make_record_full("Weekly notes", "", "", "/inner-tag", &["tokio-runtime"])),
    ];
    for (query, record) in cases {
        let url = record.url.clone();
        let outcome = ready_service(SearchIndex::new(vec![record])).search(query);
        assert_eq!(outcome.state(), QueryState::Results, "{} on {}", query, url);
        assert!(outcome.results()[0].score <= 0.3);
    }
}

#[test]
fn test_title_match_outranks_equal_body_match() {
    let index = SearchIndex::new(vec![
        make_record_full("Weekly notes", "", "this week: ownership", "/body", &[]),
        make_record_full("This week: ownership", "", "", "/title", &[]),
    ]);
    let outcome = ready_service(index).search("ownership");
    let urls: Vec<&str> = outcome.results().iter().map(|r| r.record.url.as_str()).collect();
    assert_eq!(urls, vec!["/title", "/body"]);
}
