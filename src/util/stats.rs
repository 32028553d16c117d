// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Size and integrity numbers for a published index.
//!
//! The index ships as plain JSON and the host decides on compression, so the
//! raw byte count alone is misleading. We report the brotli size as the
//! realistic transfer estimate and a CRC32 so two builds can be compared at a
//! glance.

use crc32fast::Hasher as Crc32Hasher;
use std::io::Write;

/// Byte counts and checksum of an encoded index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactStats {
    pub raw_bytes: usize,
    pub brotli_bytes: usize,
    pub crc32: u32,
}

impl ArtifactStats {
    pub fn measure(bytes: &[u8]) -> Self {
        Self {
            raw_bytes: bytes.len(),
            brotli_bytes: brotli_size(bytes),
            crc32: compute_crc32(bytes),
        }
    }
}

/// CRC32 (IEEE) of the artifact bytes.
pub fn compute_crc32(bytes: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

/// Size after brotli at quality 11, the setting static hosts precompress with.
pub fn brotli_size(bytes: &[u8]) -> usize {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        if encoder.write_all(bytes).is_err() {
            return bytes.len();
        }
    }
    compressed.len()
}

/// Format bytes as human-readable size
pub fn format_bytes(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
