//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use gleaner::build::BuildOverrides;
use gleaner::{SearchIndex, SearchService};
use serde_json::{json, Value};
use tempfile::TempDir;

// Re-export canonical test utilities from gleaner::testing
pub use gleaner::testing::{blog_corpus, index_json, make_record, make_record_full, ownership_record};

/// 2024-01-01T00:00:00Z, stamped on pages so builds are reproducible.
pub const BUILD_TIME: f64 = 1_704_067_200.0;

pub fn fixed_overrides() -> BuildOverrides {
    BuildOverrides {
        include_content: None,
        build_time: Utc.timestamp_opt(BUILD_TIME as i64, 0).single(),
    }
}

/// A service with `index` already loaded.
pub fn ready_service(index: SearchIndex) -> SearchService {
    SearchService::from_index(index, Default::default())
}

// ============================================================================
// CONTENT TREE FIXTURE
// ============================================================================

/// Writes a content tree (manifest plus one JSON file per item) into a
/// temporary directory.
pub struct ContentFixture {
    dir: TempDir,
    sections: Vec<(String, Vec<String>)>,
    pages: Vec<String>,
    manifest_extra: serde_json::Map<String, Value>,
}

impl ContentFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
            sections: Vec::new(),
            pages: Vec::new(),
            manifest_extra: serde_json::Map::new(),
        }
    }

    pub fn input_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("public")
    }

    /// Add an item to `section`, creating the section on first use.
    pub fn item(mut self, section: &str, item: Value) -> Self {
        let slug = item["path"]
            .as_str()
            .unwrap_or("untitled")
            .replace('/', "_");
        let file = format!("{}/{:03}-{}.json", section, self.file_count(), slug);
        self.write(&file, &item.to_string());
        match self.sections.iter_mut().find(|(id, _)| id == section) {
            Some((_, files)) => files.push(file),
            None => self.sections.push((section.to_string(), vec![file])),
        }
        self
    }

    pub fn page(mut self, page: Value) -> Self {
        let slug = page["path"].as_str().unwrap_or("page").replace('/', "_");
        let file = format!("pages/{}.json", slug);
        self.write(&file, &page.to_string());
        self.pages.push(file);
        self
    }

    /// List a file in the manifest with arbitrary (possibly broken) contents.
    pub fn raw_item(mut self, section: &str, file: &str, contents: &str) -> Self {
        self.write(file, contents);
        match self.sections.iter_mut().find(|(id, _)| id == section) {
            Some((_, files)) => files.push(file.to_string()),
            None => self.sections.push((section.to_string(), vec![file.to_string()])),
        }
        self
    }

    pub fn manifest_field(mut self, key: &str, value: Value) -> Self {
        self.manifest_extra.insert(key.to_string(), value);
        self
    }

    /// Write `manifest.json` and hand back the fixture.
    pub fn finish(self) -> Self {
        let sections: Vec<Value> = self
            .sections
            .iter()
            .map(|(id, items)| json!({ "id": id, "items": items }))
            .collect();
        let mut manifest = json!({
            "version": 1,
            "sections": sections,
            "pages": self.pages,
        });
        if let Value::Object(map) = &mut manifest {
            for (k, v) in &self.manifest_extra {
                map.insert(k.clone(), v.clone());
            }
        }
        self.write("manifest.json", &manifest.to_string());
        self
    }

    fn file_count(&self) -> usize {
        self.sections.iter().map(|(_, files)| files.len()).sum::<usize>() + self.pages.len()
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(path, contents).expect("write fixture file");
    }
}

pub fn post(title: &str, path: &str, body_html: &str, tags: &[&str]) -> Value {
    json!({
        "title": title,
        "description": format!("About {}", title.to_lowercase()),
        "bodyHtml": body_html,
        "path": path,
        "tags": tags,
        "publishDate": "2023-11-14T22:13:20Z",
    })
}

pub fn page(title: &str, path: &str, body_html: &str) -> Value {
    json!({
        "title": title,
        "bodyHtml": body_html,
        "path": path,
    })
}

/// The small blog most build tests use: two sections, an about page and a
/// landing page.
pub fn sample_blog() -> ContentFixture {
    ContentFixture::new()
        .item(
            "posts",
            post(
                "Rust Ownership",
                "posts/rust-ownership",
                "<p>Every value has an <em>owner</em>.</p>",
                &["rust", "memory"],
            ),
        )
        .item(
            "posts",
            post(
                "Borrow Checker",
                "posts/borrow-checker",
                "<p>References&nbsp;must not outlive their referent.</p>",
                &["rust"],
            ),
        )
        .item(
            "notes",
            post("Async Notes", "notes/async", "<ul><li>futures</li></ul>", &["async"]),
        )
        .page(page("About", "about", "<h1>About</h1><p>Hi &amp; welcome</p>"))
        .page(page("Home", "index", "<p>landing</p>"))
        .finish()
}
