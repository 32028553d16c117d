// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where the serialized index comes from.
//!
//! A source hands back raw bytes or an `IndexLoadError`; parsing happens in
//! one place (`parse_index`) no matter how the bytes arrived. The browser
//! fetch lives in `runtime::wasm` because it is async; everything here is
//! blocking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IndexLoadError;
use crate::types::SearchIndex;

/// Fetches the serialized index.
pub trait IndexSource {
    fn fetch(&self) -> Result<Vec<u8>, IndexLoadError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String {
        "search index".to_string()
    }
}

/// Closures work as sources, which keeps tests short.
impl<F> IndexSource for F
where
    F: Fn() -> Result<Vec<u8>, IndexLoadError>,
{
    fn fetch(&self) -> Result<Vec<u8>, IndexLoadError> {
        self()
    }
}

/// `search-index.json` on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>, IndexLoadError> {
        fs::read(&self.path)
            .map_err(|e| IndexLoadError::Fetch(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Bytes already in memory (embedded or fetched by someone else).
#[derive(Debug, Clone, Default)]
pub struct BytesSource {
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl IndexSource for BytesSource {
    fn fetch(&self) -> Result<Vec<u8>, IndexLoadError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory bytes", self.bytes.len())
    }
}

/// Parse a serialized index. The whole array or nothing.
pub fn parse_index(bytes: &[u8]) -> Result<SearchIndex, IndexLoadError> {
    Ok(serde_json::from_slice(bytes)?)
}
