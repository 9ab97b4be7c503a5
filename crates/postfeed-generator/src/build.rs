//! Build orchestration.
//!
//! Runs discovery, assembly, feed output and asset copies in order.

use std::{path::PathBuf, time::Instant};

use postfeed_core::{Config, FeedModel};
use thiserror::Error;
use tracing::info;

use crate::{
    assets::{AssetCopier, AssetError},
    collector::{CollectorError, ContentCollector, SiteContent},
    feed::{FeedError, FeedOutputs, FeedWriter},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Feed output error.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] postfeed_core::CoreError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of files matched by the content pattern.
    pub discovered: usize,

    /// Number of files dropped by the eligibility filter.
    pub excluded: usize,

    /// Number of items published.
    pub items: usize,

    /// Number of asset files copied.
    pub assets: usize,

    /// Feed files written.
    pub files: Vec<PathBuf>,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Feed builder that orchestrates a run.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    root: PathBuf,
}

impl Builder {
    /// Create a new builder for a site root.
    #[must_use]
    pub fn new(config: Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    /// Directory feeds are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.feed.output_dir)
    }

    /// Collect eligible items without writing anything.
    pub fn collect(&self) -> Result<SiteContent> {
        let collector = ContentCollector::new(self.config.clone(), &self.root);
        Ok(collector.collect()?)
    }

    /// Execute the full run: feeds first, then asset copies.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        self.config.validate()?;

        info!(
            root = %self.root.display(),
            output = %self.output_dir().display(),
            "starting build"
        );

        let content = self.collect()?;
        let discovered = content.discovered;
        let excluded = content.excluded;

        let model = FeedModel::build(&self.config, content.items);
        let outputs = self.write_feeds(&model)?;
        let assets = self.copy_assets()?;

        let stats = BuildStats {
            discovered,
            excluded,
            items: model.items.len(),
            assets,
            files: outputs.files.into_iter().map(|(_, path)| path).collect(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            items = stats.items,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Write all feed formats for a model.
    pub fn write_feeds(&self, model: &FeedModel) -> Result<FeedOutputs> {
        let writer = FeedWriter::new(self.output_dir(), &self.config.feed.name);
        Ok(writer.write(model)?)
    }

    /// Run the configured asset copies.
    pub fn copy_assets(&self) -> Result<usize> {
        Ok(AssetCopier::new(&self.root).copy_all(&self.config.assets)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn test_config() -> Config {
        Config::from_toml_str(
            r#"
[site]
title = "Test Site"
domain = "https://example.com"

[author]
name = "Tester"

[[assets]]
from = "public"
to = "dist"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_empty_site() {
        let dir = TempDir::new().unwrap();
        let builder = Builder::new(test_config(), dir.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.items, 0);
        assert_eq!(stats.files.len(), 3);
        assert!(dir.path().join("dist/feed.xml").exists());
    }

    #[test]
    fn test_build_copies_assets_after_feeds() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/favicon.ico"), "ico").unwrap();

        let stats = Builder::new(test_config(), dir.path()).build().unwrap();

        assert_eq!(stats.assets, 1);
        assert!(dir.path().join("dist/favicon.ico").is_file());
        assert!(dir.path().join("dist/feed.json").is_file());
    }

    #[test]
    fn test_build_surfaces_feed_write_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("dist"), "occupied").unwrap();

        let err = Builder::new(test_config(), dir.path()).build().unwrap_err();
        assert!(matches!(err, BuildError::Feed(FeedError::Write { .. })));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config();
        config.site.domain = "example.com".to_string();

        let err = Builder::new(config, dir.path()).build().unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }
}
