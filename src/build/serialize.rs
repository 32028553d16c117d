// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Encoding the index and publishing it atomically.
//!
//! The bytes go to a temp file in the output directory first and are renamed
//! over `search-index.json` only once fully written. A failed build leaves
//! whatever was there before untouched; a reader never sees half a file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::manifest::{is_plain_file_name, DEFAULT_OUTPUT_FILE};
use crate::error::{BuildError, BuildResult};
use crate::types::SearchIndex;

/// UTF-8 JSON array of records.
///
/// serde_json would quietly write a NaN date as `null`, so non-finite dates
/// are rejected here instead.
pub fn encode_index(index: &SearchIndex) -> BuildResult<Vec<u8>> {
    if let Some(bad) = index.iter().find(|r| !r.date.is_finite()) {
        return Err(BuildError::NonFiniteDate {
            url: bad.url.clone(),
        });
    }
    Ok(serde_json::to_vec(index)?)
}

/// Write `<output_dir>/search-index.json`.
pub fn write_index(output_dir: &Path, bytes: &[u8]) -> BuildResult<PathBuf> {
    write_index_as(output_dir, DEFAULT_OUTPUT_FILE, bytes)
}

/// Write `<output_dir>/<file_name>` via temp file and rename.
///
/// `file_name` must be a bare name, so the temp file and the target share a
/// directory and the rename never crosses filesystems.
pub fn write_index_as(output_dir: &Path, file_name: &str, bytes: &[u8]) -> BuildResult<PathBuf> {
    if !is_plain_file_name(file_name) {
        return Err(BuildError::OutputName {
            name: file_name.to_string(),
        });
    }
    let target = output_dir.join(file_name);
    let write_err = |source: std::io::Error| BuildError::Write {
        path: target.clone(),
        source,
    };

    fs::create_dir_all(output_dir).map_err(write_err)?;
    let mut tmp = NamedTempFile::new_in(output_dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    Ok(target)
}
