//! Content tree on disk → records.

use crate::common::{page, post, sample_blog, ContentFixture, BUILD_TIME};
use chrono::{TimeZone, Utc};
use gleaner::build::{extract_records, load_content, ExtractOptions, InputManifest};
use gleaner::{ExtractionError, SearchIndex, PAGE_SECTION};

fn options(include_content: bool) -> ExtractOptions {
    let build_time = Utc.timestamp_opt(BUILD_TIME as i64, 0).unwrap();
    ExtractOptions::new(include_content, build_time)
}

fn extract(fixture: &ContentFixture, include_content: bool) -> (SearchIndex, Vec<ExtractionError>) {
    let manifest = InputManifest::read(fixture.input_dir()).unwrap();
    let loaded = load_content(fixture.input_dir(), &manifest);
    let extraction = extract_records(&loaded.tree, &options(include_content));
    let mut skipped = loaded.failures;
    skipped.extend(extraction.skipped);
    (extraction.records, skipped)
}

#[test]
fn test_sample_blog_records() {
    let fixture = sample_blog();
    let (index, skipped) = extract(&fixture, true);

    assert!(skipped.is_empty(), "unexpected skips: {:?}", skipped);
    let urls: Vec<&str> = index.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "/posts/rust-ownership",
            "/posts/borrow-checker",
            "/notes/async",
            "/about"
        ]
    );

    let ownership = &index.records[0];
    assert_eq!(ownership.section, "posts");
    assert_eq!(ownership.tags, vec!["rust", "memory"]);
    assert_eq!(ownership.date, 1_700_000_000.0);
    assert_eq!(ownership.content, "Every value has an owner .");
}

#[test]
fn test_entities_become_spaces() {
    let fixture = sample_blog();
    let (index, _) = extract(&fixture, true);
    let borrow = index.iter().find(|r| r.title == "Borrow Checker").unwrap();
    assert_eq!(borrow.content, "References must not outlive their referent.");
}

#[test]
fn test_about_page_is_a_page_and_landing_is_skipped() {
    let fixture = sample_blog();
    let (index, _) = extract(&fixture, true);

    let about = index.iter().find(|r| r.url == "/about").unwrap();
    assert_eq!(about.section, PAGE_SECTION);
    assert!(about.tags.is_empty());
    assert_eq!(about.date, BUILD_TIME);
    assert_eq!(about.content, "About Hi welcome");
    assert!(index.iter().all(|r| r.title != "Home"));
}

#[test]
fn test_no_content_mode() {
    let fixture = sample_blog();
    let (index, _) = extract(&fixture, false);
    assert_eq!(index.len(), 4);
    assert!(index.iter().all(|r| r.content.is_empty()));
    assert!(index.iter().all(|r| !r.title.is_empty()));
}

#[test]
fn test_no_field_contains_markup() {
    let fixture = ContentFixture::new()
        .item(
            "posts",
            post(
                "Markup",
                "posts/markup",
                "<div class=\"x\"><script>alert(1)</script><b>bold</b>&amp;&lt;</div>",
                &[],
            ),
        )
        .finish();
    let (index, _) = extract(&fixture, true);
    let content = &index.records[0].content;
    assert!(!content.contains('<'), "{:?}", content);
    assert!(!content.contains('>'), "{:?}", content);
    assert!(!content.contains("&amp;"), "{:?}", content);
}

#[test]
fn test_bad_files_are_skipped_not_fatal() {
    let fixture = ContentFixture::new()
        .item("posts", post("Good", "posts/good", "<p>ok</p>", &[]))
        .raw_item("posts", "posts/broken.json", "{ not json")
        .item("posts", post("", "posts/untitled", "<p>no title</p>", &[]))
        .item("posts", post("Good again", "posts/good", "<p>same url</p>", &[]))
        .page(page("Contact", "contact", "<p>mail</p>"))
        .finish();
    let (index, skipped) = extract(&fixture, true);

    let titles: Vec<&str> = index.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Good", "Contact"]);
    assert_eq!(skipped.len(), 3);
    assert!(matches!(skipped[0], ExtractionError::Malformed { .. }));
    assert!(matches!(skipped[1], ExtractionError::MissingTitle { .. }));
    assert!(matches!(skipped[2], ExtractionError::DuplicateUrl { .. }));
}

#[test]
fn test_empty_tree_gives_empty_index() {
    let fixture = ContentFixture::new().finish();
    let (index, skipped) = extract(&fixture, true);
    assert!(index.is_empty());
    assert!(skipped.is_empty());
}
