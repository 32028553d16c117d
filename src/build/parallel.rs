// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel loading of the content tree.
//!
//! Every item and page is its own JSON file, so reading and parsing them is
//! embarrassingly parallel. Rayon's indexed `par_iter().collect()` keeps
//! manifest order, which keeps the output deterministic no matter which
//! thread finishes first.
//!
//! A file that can't be read or parsed is not fatal: it becomes an
//! `ExtractionError` next to the tree and the build carries on.

use std::fs;
use std::path::Path;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::content::{ContentItem, ContentTree, Page, Section};
use super::manifest::InputManifest;
use crate::error::ExtractionError;

/// The tree plus every file that failed to load.
#[derive(Debug, Default)]
pub struct LoadedTree {
    pub tree: ContentTree,
    pub failures: Vec<ExtractionError>,
}

fn read_json<T: DeserializeOwned>(input_dir: &Path, file: &str) -> Result<T, ExtractionError> {
    let path = input_dir.join(file);
    let raw = fs::read_to_string(&path).map_err(|source| ExtractionError::Unreadable {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ExtractionError::Malformed { path, source })
}

/// Read `files` in order, calling `on_loaded` after each one.
fn load_all<T, F>(input_dir: &Path, files: &[String], on_loaded: &F) -> Vec<Result<T, ExtractionError>>
where
    T: DeserializeOwned + Send,
    F: Fn() + Sync,
{
    let load = |file: &String| {
        let result = read_json(input_dir, file);
        on_loaded();
        result
    };

    #[cfg(feature = "parallel")]
    {
        files.par_iter().map(load).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        files.iter().map(load).collect()
    }
}

fn assemble<F: Fn() + Sync>(input_dir: &Path, manifest: &InputManifest, on_loaded: F) -> LoadedTree {
    let mut loaded = LoadedTree::default();

    for entry in &manifest.sections {
        let mut section = Section {
            id: entry.id.clone(),
            items: Vec::with_capacity(entry.items.len()),
        };
        for result in load_all::<ContentItem, F>(input_dir, &entry.items, &on_loaded) {
            match result {
                Ok(item) => section.items.push(item),
                Err(err) => loaded.fail(err),
            }
        }
        loaded.tree.sections.push(section);
    }

    for result in load_all::<Page, F>(input_dir, &manifest.pages, &on_loaded) {
        match result {
            Ok(page) => loaded.tree.pages.push(page),
            Err(err) => loaded.fail(err),
        }
    }

    loaded
}

impl LoadedTree {
    fn fail(&mut self, err: ExtractionError) {
        warn!(error = %err, "skipping content file");
        self.failures.push(err);
    }
}

/// Load every file the manifest lists.
pub fn load_content(input_dir: &Path, manifest: &InputManifest) -> LoadedTree {
    assemble(input_dir, manifest, || {})
}

/// Load every file the manifest lists, ticking a progress bar.
#[cfg(feature = "parallel")]
pub fn load_content_with_progress(
    input_dir: &Path,
    manifest: &InputManifest,
    progress: &ProgressBar,
) -> LoadedTree {
    let counter = AtomicUsize::new(0);
    let total = manifest.file_count();

    assemble(input_dir, manifest, || {
        let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
        progress.set_position(count as u64);
        if count % 10 == 0 || count == total {
            progress.set_message(format!("{}/{}", count, total));
        }
    })
}
