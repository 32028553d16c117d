// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline index construction.
//!
//! ```text
//! manifest.json ─▶ load (parallel) ─▶ extract ─▶ encode ─▶ write (atomic)
//!                        │                │
//!                        └── skipped ◀────┘
//! ```
//!
//! Anything wrong with a single content file is a skip. Anything wrong with
//! the manifest or the output is a `BuildError`, and nothing is written.

pub mod content;
pub mod extract;
pub mod manifest;
pub mod parallel;
pub mod serialize;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::{BuildResult, ExtractionError};
use crate::types::SearchIndex;
use crate::util::stats::ArtifactStats;

pub use content::{ContentItem, ContentTree, Page, PublishDate, Section};
pub use extract::{extract_records, is_root_path, strip_markup, to_url, ExtractOptions, Extraction};
pub use manifest::{is_plain_file_name, InputManifest, SectionEntry, DEFAULT_OUTPUT_FILE, MANIFEST_FILE};
pub use parallel::{load_content, LoadedTree};
pub use serialize::{encode_index, write_index, write_index_as};

/// Command-line overrides for manifest settings.
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    pub include_content: Option<bool>,
    /// Date stamped on standalone pages. Defaults to now.
    pub build_time: Option<DateTime<Utc>>,
}

/// What a build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub output_path: PathBuf,
    pub index: SearchIndex,
    /// Files and items left out, in the order they were found.
    pub skipped: Vec<ExtractionError>,
    pub stats: ArtifactStats,
}

impl BuildReport {
    pub fn record_count(&self) -> usize {
        self.index.len()
    }
}

/// Create a progress style for the loading bar
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Build `search-index.json` from the content tree under `input_dir`.
pub fn run_build(
    input_dir: &Path,
    output_dir: &Path,
    overrides: &BuildOverrides,
) -> BuildResult<BuildReport> {
    // 1. Manifest
    let manifest = InputManifest::read(input_dir)?;
    info!(
        sections = manifest.sections.len(),
        files = manifest.file_count(),
        "read manifest"
    );

    // 2. Content files
    #[cfg(feature = "parallel")]
    let loaded = {
        let load_pb = ProgressBar::new(manifest.file_count() as u64);
        load_pb.set_style(create_progress_style());
        load_pb.set_prefix("Loading");
        load_pb.set_message("content...");
        let loaded = parallel::load_content_with_progress(input_dir, &manifest, &load_pb);
        load_pb.finish_and_clear();
        loaded
    };
    #[cfg(not(feature = "parallel"))]
    let loaded = parallel::load_content(input_dir, &manifest);

    // 3. Records
    let options = ExtractOptions::new(
        overrides.include_content.unwrap_or(manifest.include_content),
        overrides.build_time.unwrap_or_else(Utc::now),
    );
    let extraction = extract_records(&loaded.tree, &options);
    let mut skipped = loaded.failures;
    skipped.extend(extraction.skipped);
    info!(
        records = extraction.records.len(),
        skipped = skipped.len(),
        include_content = options.include_content,
        "extracted records"
    );

    // 4. Encode and publish
    let bytes = encode_index(&extraction.records)?;
    let output_path = write_index_as(output_dir, manifest.output_file(), &bytes)?;
    let stats = ArtifactStats::measure(&bytes);
    info!(
        path = %output_path.display(),
        bytes = stats.raw_bytes,
        "wrote search index"
    );

    Ok(BuildReport {
        output_path,
        index: extraction.records,
        skipped,
        stats,
    })
}
