//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::types::{SearchIndex, SearchRecord};

/// A post in the "posts" section with a generated url and description.
pub fn make_record(id: usize, title: &str) -> SearchRecord {
    SearchRecord {
        title: title.to_string(),
        description: format!("Notes on {}", title),
        content: String::new(),
        url: format!("/posts/{}", id),
        tags: vec![],
        section: "posts".to_string(),
        date: 1_700_000_000.0 + id as f64 * 86_400.0,
    }
}

/// A record with every field spelled out.
pub fn make_record_full(
    title: &str,
    description: &str,
    content: &str,
    url: &str,
    tags: &[&str],
) -> SearchRecord {
    SearchRecord {
        title: title.to_string(),
        description: description.to_string(),
        content: content.to_string(),
        url: url.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        section: "posts".to_string(),
        date: 1_700_000_000.0,
    }
}

/// The canonical "Rust Ownership" post used by the owner-query scenarios.
pub fn ownership_record() -> SearchRecord {
    make_record_full("Rust Ownership", "memory safety", "", "/p/1", &["rust", "memory"])
}

const TOPICS: [&str; 8] = [
    "Rust Ownership",
    "Borrow Checker Basics",
    "Async Runtimes",
    "Error Handling Patterns",
    "Static Site Generators",
    "Fuzzy Matching with Bitap",
    "Memory Layout of Enums",
    "Writing a Tokenizer",
];

const TAGS: [&str; 5] = ["rust", "memory", "async", "web", "parsing"];

/// `n` posts cycling through a small set of topics, with bodies long enough
/// that content matches land at varying distances.
pub fn blog_corpus(n: usize) -> SearchIndex {
    let records = (0..n)
        .map(|i| {
            let topic = TOPICS[i % TOPICS.len()];
            let title = if i < TOPICS.len() {
                topic.to_string()
            } else {
                format!("{} #{}", topic, i / TOPICS.len())
            };
            let mut record = make_record(i, &title);
            record.description = format!("A short post about {}", topic.to_lowercase());
            record.content = format!(
                "{} {}",
                "Filler paragraph. ".repeat(i % 7),
                topic.to_lowercase()
            );
            record.tags = vec![
                TAGS[i % TAGS.len()].to_string(),
                TAGS[(i + 2) % TAGS.len()].to_string(),
            ];
            record
        })
        .collect();
    SearchIndex::new(records)
}

/// Serialize an index the way the build writes it.
pub fn index_json(index: &SearchIndex) -> Vec<u8> {
    serde_json::to_vec(index).unwrap_or_default()
}
