// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for index building and index loading.
//!
//! Three tiers, each with a different blast radius:
//!
//! | Type              | Raised by            | Policy                         |
//! |-------------------|----------------------|--------------------------------|
//! | `ExtractionError` | content extraction   | skip the item, keep building   |
//! | `BuildError`      | manifest, serializer | abort the step, no partial file|
//! | `IndexLoadError`  | index loader         | engine stays "not ready"       |
//!
//! Query-time conditions (query too short, index not ready, nothing matched)
//! are not errors at all. They are `QueryState` values.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for the build step.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// A single content item that could not be turned into a record.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("{path}: item has an empty title")]
    MissingTitle { path: String },

    #[error("{path}: publish date {value} is not a valid timestamp")]
    InvalidDate { path: String, value: String },

    #[error("{url}: duplicate url, already indexed by an earlier item")]
    DuplicateUrl { url: String },

    #[error("Failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fatal failure of the build step.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest JSON in {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported manifest version {found} (expected {expected})")]
    ManifestVersion { found: u32, expected: u32 },

    #[error("Record {url} has a non-finite date")]
    NonFiniteDate { url: String },

    #[error("Failed to encode search index: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Output {name:?} is not a plain file name")]
    OutputName { name: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why the client-side index never became queryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexLoadError {
    #[error("Failed to fetch search index: {0}")]
    Fetch(String),

    #[error("Search index request returned HTTP {0}")]
    Status(u16),

    #[error("Failed to parse search index: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for IndexLoadError {
    fn from(err: serde_json::Error) -> Self {
        IndexLoadError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for IndexLoadError {
    fn from(err: std::io::Error) -> Self {
        IndexLoadError::Fetch(err.to_string())
    }
}
