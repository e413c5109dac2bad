//! Size estimation and the one real measurement of a finished tree

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// BMP output is roughly three times the size of a compressed source
pub const INFLATION_FACTOR: u64 = 3;

/// Estimated on-disk size of one variant, from the source file's size.
///
/// Never zero, so budget arithmetic can divide by it.
pub fn estimate_file_size(source: &Path) -> Result<u64> {
    if !source.exists() {
        return Err(Error::PathNotFound(source.to_path_buf()));
    }
    let len = fs::metadata(source)?.len();
    Ok(estimated_from_len(len))
}

pub(crate) fn estimated_from_len(len: u64) -> u64 {
    len.saturating_mul(INFLATION_FACTOR).max(1)
}

/// Whole variants of `file_size` that fit in `bytes`
pub fn images_that_fit(bytes: u64, file_size: u64) -> u64 {
    bytes / file_size.max(1)
}

/// Files and bytes found under a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeSize {
    pub files: u64,
    pub bytes: u64,
}

/// Walk `root` and sum the sizes of every regular file below it.
///
/// Entries that vanish or cannot be read mid-walk are skipped.
pub fn measure_tree(root: &Path) -> Result<TreeSize> {
    if !root.exists() {
        return Err(Error::PathNotFound(root.to_path_buf()));
    }

    let mut size = TreeSize::default();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(meta) = entry.metadata() {
            size.files += 1;
            size.bytes += meta.len();
        }
    }

    log::debug!(
        "Measured {}: {} files, {} bytes",
        root.display(),
        size.files,
        size.bytes
    );
    Ok(size)
}
