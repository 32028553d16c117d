// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `manifest.json`: which files make up the content tree.
//!
//! ```json
//! {
//!   "version": 1,
//!   "includeContent": true,
//!   "sections": [{ "id": "posts", "items": ["posts/a.json", "posts/b.json"] }],
//!   "pages": ["pages/about.json", "pages/index.json"],
//!   "output": "search-index.json"
//! }
//! ```
//!
//! File paths are relative to the manifest's directory.

use serde::Deserialize;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path};

use crate::error::{BuildError, BuildResult};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const MANIFEST_VERSION: u32 = 1;
pub const DEFAULT_OUTPUT_FILE: &str = "search-index.json";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InputManifest {
    pub version: u32,
    #[serde(default = "default_include_content")]
    pub include_content: bool,
    #[serde(default)]
    pub sections: Vec<SectionEntry>,
    #[serde(default)]
    pub pages: Vec<String>,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SectionEntry {
    pub id: String,
    #[serde(default)]
    pub items: Vec<String>,
}

fn default_include_content() -> bool {
    true
}

impl InputManifest {
    /// Read and validate `<input_dir>/manifest.json`.
    pub fn read(input_dir: &Path) -> BuildResult<Self> {
        let path = input_dir.join(MANIFEST_FILE);
        let raw = fs::read_to_string(&path).map_err(|source| BuildError::ManifestRead {
            path: path.clone(),
            source,
        })?;
        let manifest: InputManifest = serde_json::from_str(&raw)
            .map_err(|source| BuildError::ManifestParse { path, source })?;
        if manifest.version != MANIFEST_VERSION {
            return Err(BuildError::ManifestVersion {
                found: manifest.version,
                expected: MANIFEST_VERSION,
            });
        }
        if let Some(name) = manifest.output.as_deref() {
            if !is_plain_file_name(name) {
                return Err(BuildError::OutputName {
                    name: name.to_string(),
                });
            }
        }
        Ok(manifest)
    }

    pub fn output_file(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    /// Item and page files together.
    pub fn file_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum::<usize>() + self.pages.len()
    }
}

/// One normal path component: no separators, no `..`, not absolute.
pub fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first == OsStr::new(name)
    )
}
