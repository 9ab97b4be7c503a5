//! Static asset copying.
//!
//! Mirrors configured source directories into destination directories.

use std::{
    fs,
    path::{Path, PathBuf},
};

use postfeed_core::config::AssetCopy;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Asset copy errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copies asset directories, overwriting existing files.
#[derive(Debug, Clone)]
pub struct AssetCopier {
    root: PathBuf,
}

impl AssetCopier {
    /// Create a copier that resolves relative paths against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Run every configured copy. Returns the total number of files copied.
    pub fn copy_all(&self, copies: &[AssetCopy]) -> Result<usize> {
        let mut total = 0;
        for entry in copies {
            total += self.copy(&self.root.join(&entry.from), &self.root.join(&entry.to))?;
        }
        Ok(total)
    }

    /// Recursively copy `from` into `to`. A missing source copies nothing.
    pub fn copy(&self, from: &Path, to: &Path) -> Result<usize> {
        if !from.exists() {
            debug!(source = %from.display(), "asset source does not exist, skipping");
            return Ok(0);
        }

        info!(
            source = %from.display(),
            dest = %to.display(),
            "copying assets"
        );

        let mut count = 0;
        for entry in WalkDir::new(from).sort_by_file_name() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|_| AssetError::InvalidPath(entry.path().to_path_buf()))?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            debug!(file = %relative.display(), "copied asset");
            count += 1;
        }

        info!(count, "assets copied");
        Ok(count)
    }
}
