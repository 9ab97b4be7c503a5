//! Loaded content documents.

use std::path::{Path, PathBuf};

use crate::frontmatter::Frontmatter;

/// A content file split into metadata and body, before rendering.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Path relative to the site root, e.g. `pages/posts/hello.md`.
    pub path: PathBuf,

    /// Parsed metadata block.
    pub frontmatter: Frontmatter,

    /// Source text after the metadata block.
    pub body: String,
}

impl RawDocument {
    /// Create a new document.
    pub fn new(path: impl Into<PathBuf>, frontmatter: Frontmatter, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            frontmatter,
            body: body.into(),
        }
    }

    /// The relative path with `/` separators on every platform.
    pub fn path_str(&self) -> String {
        normalize_separators(&self.path)
    }

    /// Title from metadata, falling back to the file stem.
    pub fn title(&self) -> String {
        self.frontmatter.title.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }
}

/// Render a path with forward slashes.
pub fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Whether a relative path names an index document.
///
/// This is a plain substring test on the whole relative path.
pub fn is_index_path(path: &str) -> bool {
    path.contains("index")
}

/// Site-relative URL path of a document.
///
/// Strips `prefix` from the front and the `.md` suffix from the end:
/// - `pages/posts/hello.md` with prefix `pages` → `/posts/hello`
/// - `notes/hello.md` with prefix `pages` → `/notes/hello`
pub fn permalink(path: &str, prefix: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let stripped = if prefix.is_empty() {
        path
    } else {
        path.strip_prefix(prefix)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(path)
    };
    let stripped = stripped.strip_suffix(".md").unwrap_or(stripped);

    if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{stripped}")
    }
}
