//! Ranking and query-state invariants.

use gleaner::{QueryState, SearchIndex, SearchOptions, SearchRecord, SearchService};
use proptest::prelude::*;

fn record(i: usize, title: String, content: String) -> SearchRecord {
    SearchRecord {
        title,
        description: String::new(),
        content,
        url: format!("/p/{}", i),
        tags: vec![],
        section: "posts".to_string(),
        date: 1_700_000_000.0,
    }
}

fn corpus_strategy() -> impl Strategy<Value = SearchIndex> {
    prop::collection::vec(("[a-z ]{2,24}", "[a-z ]{0,80}"), 0..30).prop_map(|pairs| {
        SearchIndex::new(
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (title, content))| record(i, title, content))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn prop_results_sorted_within_threshold_and_capped(
        index in corpus_strategy(),
        query in "[a-z]{2,6}",
    ) {
        let service = SearchService::from_index(index, SearchOptions::default());
        let outcome = service.search(&query);

        let scores: Vec<f64> = outcome.results().iter().map(|r| r.score).collect();
        prop_assert!(scores.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(scores.iter().all(|s| *s >= 0.0 && *s <= 0.3));
        prop_assert!(outcome.results().len() <= 10);
        prop_assert!(outcome.results().len() <= outcome.total_matches());
        match outcome.state() {
            QueryState::Results => prop_assert!(!outcome.results().is_empty()),
            QueryState::NoResults => prop_assert!(outcome.results().is_empty()),
            other => prop_assert!(false, "unexpected state {:?}", other),
        }
    }

    #[test]
    fn prop_short_queries_are_type_more(index in corpus_strategy(), query in "[a-z가-힣]{0,1}") {
        let service = SearchService::from_index(index, SearchOptions::default());
        prop_assert_eq!(service.search(&query).state(), QueryState::TypeMore);
    }

    #[test]
    fn prop_equal_scores_keep_index_order(index in corpus_strategy(), query in "[a-z]{2,5}") {
        let service = SearchService::from_index(index, SearchOptions::default());
        let outcome = service.search(&query);
        for pair in outcome.results().windows(2) {
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].index < pair[1].index);
            }
        }
    }
}
