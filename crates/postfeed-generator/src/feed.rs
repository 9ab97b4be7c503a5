//! Feed serialization and output.
//!
//! Every format renders from the same [`FeedModel`]. All three documents are
//! rendered before anything is written, so a serializer failure leaves the
//! output directory untouched.

use std::{
    fs,
    path::{Path, PathBuf},
};

use postfeed_core::{FeedFormat, FeedModel};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{atom::AtomGenerator, json::JsonFeedGenerator, rss::RssGenerator};

/// Feed output errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// JSON serialization error.
    #[error("JSON feed error: {0}")]
    Json(#[from] serde_json::Error),

    /// A feed file could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// A serializer for one syndication format.
pub trait FeedRenderer {
    /// The format produced.
    fn format(&self) -> FeedFormat;

    /// Serialize the model.
    fn render(&self, model: &FeedModel) -> Result<String>;
}

/// Serializer for a format.
pub fn renderer_for(format: FeedFormat) -> &'static (dyn FeedRenderer + Sync) {
    match format {
        FeedFormat::Rss => &RssGenerator,
        FeedFormat::Atom => &AtomGenerator,
        FeedFormat::Json => &JsonFeedGenerator,
    }
}

/// Guess an image MIME type from a URL's extension.
pub fn image_mime_type(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "image/jpeg",
    }
}

/// Files written by one run.
#[derive(Debug, Clone, Default)]
pub struct FeedOutputs {
    pub files: Vec<(FeedFormat, PathBuf)>,
}

impl FeedOutputs {
    /// Path written for a format.
    pub fn path(&self, format: FeedFormat) -> Option<&Path> {
        self.files
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, path)| path.as_path())
    }
}

/// Writes `<name>.xml`, `<name>.atom` and `<name>.json` into an output directory.
#[derive(Debug, Clone)]
pub struct FeedWriter {
    output_dir: PathBuf,
    name: String,
}

impl FeedWriter {
    /// Create a new writer.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            name: name.into(),
        }
    }

    /// Target path for a format.
    pub fn path_for(&self, format: FeedFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.name, format.extension()))
    }

    /// Render all formats in parallel, in [`FeedFormat::ALL`] order.
    pub fn render_all(&self, model: &FeedModel) -> Result<Vec<(FeedFormat, String)>> {
        FeedFormat::ALL
            .par_iter()
            .map(|&format| {
                let renderer = renderer_for(format);
                renderer.render(model).map(|body| (renderer.format(), body))
            })
            .collect()
    }

    /// Render and write all formats. Existing files are overwritten.
    pub fn write(&self, model: &FeedModel) -> Result<FeedOutputs> {
        let rendered = self.render_all(model)?;

        fs::create_dir_all(&self.output_dir).map_err(|source| FeedError::Write {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut outputs = FeedOutputs::default();
        for (format, body) in rendered {
            let path = self.path_for(format);
            fs::write(&path, body).map_err(|source| FeedError::Write {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "wrote feed");
            outputs.files.push((format, path));
        }

        info!(
            dir = %self.output_dir.display(),
            items = model.items.len(),
            "feeds written"
        );

        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use postfeed_core::Config;
    use tempfile::TempDir;

    use super::*;

    fn empty_model() -> FeedModel {
        let config = Config::from_toml_str(
            r#"
[site]
title = "Empty"
domain = "https://example.com"

[author]
name = "Tester"
"#,
        )
        .unwrap();
        FeedModel::build(&config, vec![])
    }

    #[test]
    fn test_image_mime_type() {
        assert_eq!(image_mime_type("https://x/a.png"), "image/png");
        assert_eq!(image_mime_type("https://x/a.PNG?v=2"), "image/png");
        assert_eq!(image_mime_type("https://x/a.jpg"), "image/jpeg");
        assert_eq!(image_mime_type("https://x/a"), "image/jpeg");
        assert_eq!(image_mime_type("https://x/a.svg#frag"), "image/svg+xml");
    }

    #[test]
    fn test_write_creates_directory_and_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/dist");
        let writer = FeedWriter::new(&out, "feed");

        let outputs = writer.write(&empty_model()).unwrap();

        assert_eq!(outputs.files.len(), 3);
        assert!(out.join("feed.xml").is_file());
        assert!(out.join("feed.atom").is_file());
        assert!(out.join("feed.json").is_file());
        assert_eq!(outputs.path(FeedFormat::Json), Some(out.join("feed.json").as_path()));
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("feed.xml"), "stale").unwrap();
        fs::write(dir.path().join("keep.txt"), "other").unwrap();

        FeedWriter::new(dir.path(), "feed")
            .write(&empty_model())
            .unwrap();

        let rss = fs::read_to_string(dir.path().join("feed.xml")).unwrap();
        assert!(rss.contains("<rss"));
        assert!(dir.path().join("keep.txt").exists());
    }

    #[test]
    fn test_renderer_for_each_format() {
        for format in FeedFormat::ALL {
            assert_eq!(renderer_for(format).format(), format);
        }
    }

    #[test]
    fn test_render_all_order() {
        let rendered = FeedWriter::new("dist", "feed")
            .render_all(&empty_model())
            .unwrap();
        let formats: Vec<FeedFormat> = rendered.iter().map(|(f, _)| *f).collect();
        assert_eq!(formats, FeedFormat::ALL);
    }

    #[test]
    fn test_write_fails_when_output_is_a_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        fs::write(&out, "not a directory").unwrap();

        let err = FeedWriter::new(&out, "feed")
            .write(&empty_model())
            .unwrap_err();

        assert!(matches!(err, FeedError::Write { ref path, .. } if *path == out));
        assert_eq!(fs::read_to_string(&out).unwrap(), "not a directory");
    }

    #[test]
    fn test_custom_name() {
        let writer = FeedWriter::new("dist", "posts");
        assert_eq!(writer.path_for(FeedFormat::Atom), PathBuf::from("dist/posts.atom"));
    }
}
