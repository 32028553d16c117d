//! Rendering: escaping, highlight spans, markup structure.

use crate::common::{make_record_full, ready_service};
use gleaner::{QueryState, Renderer, SearchIndex};

#[test]
fn test_markup_in_titles_is_escaped() {
    let service = ready_service(SearchIndex::new(vec![make_record_full(
        "<script>alert(1)</script> Rust",
        "a & b",
        "",
        "/xss",
        &["<i>"],
    )]));
    let outcome = service.search("rust");
    let rendered = Renderer::default().render(outcome.results());

    let item = &rendered[0];
    assert!(!item.title_html.contains("<script>"));
    assert!(item.title_html.contains("&lt;script&gt;"));
    assert!(item.title_html.ends_with("<mark>Rust</mark>"));
    assert_eq!(item.description_html, "a &amp; b");
    assert_eq!(item.tag_chips, vec!["&lt;i&gt;"]);
}

#[test]
fn test_markup_in_query_is_literal() {
    let service = ready_service(SearchIndex::new(vec![make_record_full(
        "Using <b> tags",
        "",
        "",
        "/b",
        &[],
    )]));
    let outcome = service.search("<b>");
    assert_eq!(outcome.state(), QueryState::Results);

    let rendered = Renderer::default().render(outcome.results());
    assert_eq!(rendered[0].title_html, "Using <mark>&lt;b&gt;</mark> tags");
}

#[test]
fn test_every_occurrence_marked() {
    let service = ready_service(SearchIndex::new(vec![make_record_full(
        "Rust and more rust",
        "",
        "",
        "/twice",
        &[],
    )]));
    let outcome = service.search("rust");
    let html = &Renderer::default().render(outcome.results())[0].title_html;
    assert_eq!(html, "<mark>Rust</mark> and more <mark>rust</mark>");
}

#[test]
fn test_result_html_structure() {
    let service = ready_service(SearchIndex::new(vec![make_record_full(
        "Rust Ownership",
        "memory safety",
        "",
        "/p/1?a=1&b=\"2\"",
        &["rust"],
    )]));
    let outcome = service.search("owner");
    let html = Renderer::default().render_html(outcome.results());

    assert!(html.starts_with("<a href=\"/p/1?a=1&amp;b=&quot;2&quot;\" class=\"search-result-item\">"));
    for class in [
        "search-result-title",
        "search-result-description",
        "search-result-meta",
        "search-result-date",
        "search-tag",
    ] {
        assert!(html.contains(class), "missing {}", class);
    }
    assert!(html.ends_with("</div></a>"));
}

#[test]
fn test_status_html_wraps_message() {
    let html = Renderer::default()
        .status_html(QueryState::NoResults)
        .unwrap();
    assert_eq!(html, "<div class=\"search-no-results\">검색 결과가 없습니다.</div>");
}
