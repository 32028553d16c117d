// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Content tree → ordered `SearchRecord`s.
//!
//! Sections first (tree order, items in section order), then standalone
//! pages. A bad item never sinks the build: it is logged, recorded in
//! `Extraction::skipped`, and the rest carry on.
//!
//! # Markup stripping
//!
//! Bodies are reduced to plain text in three passes:
//!
//! ```text
//! "<p>Borrow&nbsp;<em>checker</em></p>"
//!   tags     → " Borrow&nbsp; checker  "
//!   entities → " Borrow  checker  "
//!   spaces   → "Borrow checker"
//! ```
//!
//! Every removed sequence becomes a space, so `a<br>b` is two words, not one.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, warn};

use super::content::{ContentItem, ContentTree, Page};
use crate::error::ExtractionError;
use crate::types::{SearchIndex, SearchRecord, PAGE_SECTION};

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[^;]+;").expect("entity pattern is valid"));

/// Paths that denote the site's landing page.
const ROOT_PATHS: [&str; 6] = ["", "/", "index", "/index", "index.html", "/index.html"];

/// Extraction settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    /// Keep stripped body text in `content`. Off gives a smaller index that
    /// only matches on title, description and tags.
    pub include_content: bool,
    /// Epoch seconds stamped on standalone pages, which have no date of their
    /// own.
    pub build_time: f64,
}

impl ExtractOptions {
    pub fn new(include_content: bool, build_time: DateTime<Utc>) -> Self {
        Self {
            include_content,
            build_time: epoch_seconds(build_time),
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new(true, Utc::now())
    }
}

fn epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_millis()) / 1000.0
}

/// What came out of a tree.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: SearchIndex,
    pub skipped: Vec<ExtractionError>,
}

/// Strip tags and entities, collapse whitespace, trim.
pub fn strip_markup(html: &str) -> String {
    let without_tags = TAG.replace_all(html, " ");
    let without_entities = ENTITY.replace_all(&without_tags, " ");
    without_entities
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Does this page path point at the landing page?
pub fn is_root_path(path: &str) -> bool {
    ROOT_PATHS.contains(&path.trim())
}

/// `posts/a` → `/posts/a`. Absolute URLs and rooted paths pass through.
pub fn to_url(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') || path.contains("://") {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Build the record list for a tree.
pub fn extract_records(tree: &ContentTree, options: &ExtractOptions) -> Extraction {
    let mut collector = Collector::default();

    for section in &tree.sections {
        for item in &section.items {
            collector.admit(item_record(item, &section.id, options));
        }
    }

    for page in &tree.pages {
        if is_root_path(&page.path) {
            debug!(path = %page.path, "skipping landing page");
            continue;
        }
        collector.admit(page_record(page, options));
    }

    collector.finish()
}

#[derive(Default)]
struct Collector {
    records: Vec<SearchRecord>,
    skipped: Vec<ExtractionError>,
    seen_urls: HashSet<String>,
}

impl Collector {
    fn admit(&mut self, record: Result<SearchRecord, ExtractionError>) {
        let outcome = record.and_then(|r| {
            if self.seen_urls.insert(r.url.clone()) {
                Ok(r)
            } else {
                Err(ExtractionError::DuplicateUrl { url: r.url })
            }
        });
        match outcome {
            Ok(record) => self.records.push(record),
            Err(err) => self.skip(err),
        }
    }

    fn skip(&mut self, err: ExtractionError) {
        warn!(error = %err, "skipping content item");
        self.skipped.push(err);
    }

    fn finish(self) -> Extraction {
        Extraction {
            records: SearchIndex::new(self.records),
            skipped: self.skipped,
        }
    }
}

fn body_text(body_html: &str, options: &ExtractOptions) -> String {
    if options.include_content {
        strip_markup(body_html)
    } else {
        String::new()
    }
}

fn item_record(
    item: &ContentItem,
    section: &str,
    options: &ExtractOptions,
) -> Result<SearchRecord, ExtractionError> {
    if item.title.trim().is_empty() {
        return Err(ExtractionError::MissingTitle {
            path: item.path.clone(),
        });
    }
    let date = item
        .publish_date
        .to_epoch_seconds()
        .ok_or_else(|| ExtractionError::InvalidDate {
            path: item.path.clone(),
            value: item.publish_date.to_string(),
        })?;

    Ok(SearchRecord {
        title: item.title.clone(),
        description: item.description.clone(),
        content: body_text(&item.body_html, options),
        url: to_url(&item.path),
        tags: item.tags.clone(),
        section: section.to_string(),
        date,
    })
}

fn page_record(page: &Page, options: &ExtractOptions) -> Result<SearchRecord, ExtractionError> {
    if page.title.trim().is_empty() {
        return Err(ExtractionError::MissingTitle {
            path: page.path.clone(),
        });
    }

    Ok(SearchRecord {
        title: page.title.clone(),
        description: page.description.clone(),
        content: body_text(&page.body_html, options),
        url: to_url(&page.path),
        tags: Vec::new(),
        section: PAGE_SECTION.to_string(),
        // Pages carry no authored date; the build time stands in
        date: options.build_time,
    })
}
