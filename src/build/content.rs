// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The content tree the extractor reads: grouped items plus standalone pages.
//!
//! On disk each item and page is its own JSON file, exported by the site
//! generator and listed in `manifest.json`:
//!
//! ```json
//! { "title": "Rust Ownership", "description": "memory safety",
//!   "bodyHtml": "<p>Borrowing &amp; moves</p>", "path": "posts/rust-ownership",
//!   "tags": ["rust"], "publishDate": "2023-11-14T22:13:20Z" }
//! ```

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

/// When an item was published: RFC 3339 text, a plain `YYYY-MM-DD` date
/// (midnight UTC), or epoch seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PublishDate {
    Epoch(f64),
    Text(String),
}

impl PublishDate {
    /// Epoch seconds, or `None` if the value is not a usable timestamp.
    pub fn to_epoch_seconds(&self) -> Option<f64> {
        match self {
            PublishDate::Epoch(secs) => secs.is_finite().then_some(*secs),
            PublishDate::Text(text) => parse_date_text(text.trim()),
        }
    }
}

impl std::fmt::Display for PublishDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishDate::Epoch(secs) => write!(f, "{}", secs),
            PublishDate::Text(text) => write!(f, "{:?}", text),
        }
    }
}

fn parse_date_text(text: &str) -> Option<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9);
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().timestamp() as f64)
}

/// A dated, tagged content item (a post).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body_html: String,
    pub path: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub publish_date: PublishDate,
}

/// A standalone page: no tags, no date of its own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body_html: String,
    pub path: String,
}

/// Items sharing a group id, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub id: String,
    pub items: Vec<ContentItem>,
}

/// Everything the extractor looks at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentTree {
    pub sections: Vec<Section>,
    pub pages: Vec<Page>,
}

impl ContentTree {
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}
