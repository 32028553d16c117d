//! Whole-pipeline scenarios: load bytes, query, render.

use crate::common::{index_json, make_record, make_record_full, ownership_record};
use gleaner::{BytesSource, QueryState, Renderer, SearchIndex, SearchService};

fn loaded(index: &SearchIndex) -> SearchService {
    let service = SearchService::default();
    service.load(&BytesSource::new(index_json(index)));
    service
}

#[test]
fn test_owner_finds_ownership() {
    let service = loaded(&SearchIndex::new(vec![ownership_record()]));
    let outcome = service.search("owner");

    assert_eq!(outcome.state(), QueryState::Results);
    assert_eq!(outcome.results().len(), 1);
    let hit = &outcome.results()[0];
    assert_eq!(hit.record.url, "/p/1");
    assert!((hit.score - 0.05).abs() < 1e-9, "score {}", hit.score);

    let rendered = Renderer::default().render(outcome.results());
    assert_eq!(rendered[0].title_html, "Rust <mark>Owner</mark>ship");
    assert_eq!(rendered[0].description_html, "memory safety");
    assert_eq!(rendered[0].date_display, "2023. 11. 15.");
    assert_eq!(rendered[0].tag_chips, vec!["rust", "memory"]);
}

#[test]
fn test_typo_still_ranks_but_is_not_highlighted() {
    let service = loaded(&SearchIndex::new(vec![ownership_record()]));
    let outcome = service.search("ownershop");

    assert_eq!(outcome.state(), QueryState::Results);
    let rendered = Renderer::default().render(outcome.results());
    assert!(!rendered[0].title_html.contains("<mark>"));
}

#[test]
fn test_korean_query() {
    let index = SearchIndex::new(vec![
        make_record_full("러스트 소유권", "메모리 안전성", "", "/ko/1", &["러스트"]),
        make_record_full("Async Notes", "", "", "/en/1", &[]),
    ]);
    let service = loaded(&index);
    let outcome = service.search("소유권");

    assert_eq!(outcome.results().len(), 1);
    assert_eq!(outcome.results()[0].record.url, "/ko/1");
    let rendered = Renderer::default().render(outcome.results());
    assert_eq!(rendered[0].title_html, "러스트 <mark>소유권</mark>");
}

#[test]
fn test_results_capped_at_ten() {
    let index = SearchIndex::new(
        (0..25)
            .map(|i| make_record(i, &format!("Rust Tips {}", i)))
            .collect(),
    );
    let service = loaded(&index);
    let outcome = service.search("rust tips");

    assert_eq!(outcome.total_matches(), 25);
    assert_eq!(outcome.results().len(), 10);
    assert_eq!(Renderer::default().render(outcome.results()).len(), 10);
}

#[test]
fn test_renderer_caps_uncapped_input() {
    let index = SearchIndex::new(
        (0..15)
            .map(|i| make_record(i, &format!("Rust Tips {}", i)))
            .collect(),
    );
    let engine = gleaner::QueryEngine::new(index, Default::default());
    let all = engine.search("rust");
    assert_eq!(all.len(), 15);
    assert_eq!(Renderer::default().render(&all).len(), 10);
}

#[test]
fn test_pages_are_searchable() {
    let mut about = make_record_full("About This Blog", "", "written in rust", "/about", &[]);
    about.section = gleaner::PAGE_SECTION.to_string();
    let service = loaded(&SearchIndex::new(vec![about]));
    let outcome = service.search("about");
    assert_eq!(outcome.results()[0].record.section, "page");
}
