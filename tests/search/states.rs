//! Query states across the load lifecycle.

use std::sync::Arc;

use crate::common::{blog_corpus, index_json, ownership_record};
use gleaner::{
    BytesSource, IndexLoadError, QueryState, Readiness, Renderer, SearchIndex, SearchService,
};

#[test]
fn test_short_query_wins_over_everything() {
    let pending = SearchService::default();
    for query in ["", "a", "가"] {
        assert_eq!(pending.search(query).state(), QueryState::TypeMore);
    }

    let ready = SearchService::from_index(blog_corpus(5), Default::default());
    assert_eq!(ready.search("r").state(), QueryState::TypeMore);
}

#[test]
fn test_not_ready_until_loaded() {
    let service = SearchService::default();
    assert_eq!(service.readiness(), Readiness::Pending);
    assert_eq!(service.search("rust").state(), QueryState::NotReady);

    service.load(&BytesSource::new(index_json(&SearchIndex::new(vec![
        ownership_record(),
    ]))));
    assert_eq!(service.search("rust").state(), QueryState::Results);
}

#[test]
fn test_failed_load_stays_not_ready() {
    let service = SearchService::default();
    let failing = || -> Result<Vec<u8>, IndexLoadError> { Err(IndexLoadError::Status(404)) };

    assert_eq!(service.load(&failing), Readiness::Unavailable);
    assert!(matches!(service.load_error(), Some(IndexLoadError::Status(404))));
    assert_eq!(service.search("rust").state(), QueryState::NotReady);
}

#[test]
fn test_malformed_bytes_are_unavailable() {
    let service = SearchService::default();
    assert_eq!(
        service.load(&BytesSource::new(&b"{\"not\": \"an array\"}"[..])),
        Readiness::Unavailable
    );
    assert!(matches!(service.load_error(), Some(IndexLoadError::Parse(_))));
}

#[test]
fn test_second_load_is_ignored() {
    let service = SearchService::default();
    service.load(&BytesSource::new(&b"[]"[..]));
    service.load(&BytesSource::new(index_json(&SearchIndex::new(vec![
        ownership_record(),
    ]))));

    assert_eq!(service.index().map(|i| i.len()), Some(0));
    assert_eq!(service.search("owner").state(), QueryState::NoResults);
}

#[test]
fn test_no_results() {
    let service = SearchService::from_index(blog_corpus(10), Default::default());
    assert_eq!(service.search("zzzzqqqq").state(), QueryState::NoResults);
}

#[test]
fn test_status_messages_per_state() {
    let renderer = Renderer::default();
    assert_eq!(
        renderer.status_message(QueryState::TypeMore),
        Some("검색어를 2자 이상 입력해주세요.")
    );
    assert_eq!(
        renderer.status_message(QueryState::NotReady),
        Some("검색 인덱스를 로딩 중입니다...")
    );
    assert_eq!(
        renderer.status_message(QueryState::NoResults),
        Some("검색 결과가 없습니다.")
    );
    assert_eq!(renderer.status_message(QueryState::Results), None);
}

#[test]
fn test_concurrent_queries_agree() {
    let service = Arc::new(SearchService::from_index(blog_corpus(50), Default::default()));
    let expected: Vec<String> = service
        .search("borrow")
        .results()
        .iter()
        .map(|r| r.record.url.clone())
        .collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let service = Arc::clone(&service);
            let expected = &expected;
            scope.spawn(move || {
                for _ in 0..10 {
                    let urls: Vec<String> = service
                        .search("borrow")
                        .results()
                        .iter()
                        .map(|r| r.record.url.clone())
                        .collect();
                    assert_eq!(&urls, expected);
                }
            });
        }
    });
}
