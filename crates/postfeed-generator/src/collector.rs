//! Content collection.
//!
//! Discovers content files, loads and filters them, and assembles feed items.
//! Documents are processed in parallel; results keep discovery order and are
//! sorted only after every document has finished.

use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::MatchOptions;
use postfeed_core::{
    Author, Config, CoreError, FeedItem, RawDocument,
    content::{is_index_path, normalize_separators, permalink},
    date::parse_date,
    feed::sort_items,
};
use postfeed_parser::{ContentTransformer, Transformed};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The discovery pattern is not a valid glob.
    #[error("invalid content pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The content root or a matched entry could not be read.
    #[error("cannot read {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A content file could not be read.
    #[error("cannot load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parser error.
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Invalid metadata, such as an unparseable date.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Collected feed content.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// Eligible items, newest first.
    pub items: Vec<FeedItem>,

    /// Number of files matched by the discovery pattern.
    pub discovered: usize,

    /// Number of files dropped by the eligibility filter.
    pub excluded: usize,
}

/// Content collector that discovers and assembles feed items.
#[derive(Debug)]
pub struct ContentCollector {
    config: Config,
    root: PathBuf,
    transformer: ContentTransformer,
    author: Author,
}

impl ContentCollector {
    /// Create a new content collector rooted at the site directory.
    #[must_use]
    pub fn new(config: Config, root: impl Into<PathBuf>) -> Self {
        let transformer = ContentTransformer::new(config.domain());
        let author = Author::from_config(&config);
        Self {
            config,
            root: root.into(),
            transformer,
            author,
        }
    }

    /// Collect all eligible items, sorted newest first.
    pub fn collect(&self) -> Result<SiteContent> {
        info!(
            root = %self.root.display(),
            pattern = %self.config.content.pattern,
            "collecting content"
        );

        let files = self.discover()?;
        info!(count = files.len(), "found content files");

        let processed = files
            .par_iter()
            .map(|path| self.process(path))
            .collect::<Result<Vec<_>>>()?;

        let discovered = processed.len();
        let mut items: Vec<FeedItem> = processed.into_iter().flatten().collect();
        let excluded = discovered - items.len();

        sort_items(&mut items);

        info!(items = items.len(), excluded, "content collection complete");

        Ok(SiteContent {
            items,
            discovered,
            excluded,
        })
    }

    /// Find content files matching the configured pattern.
    ///
    /// Only what the pattern names is matched; `*` does not cross directories
    /// and does not match a leading `.`.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        fs::read_dir(&self.root).map_err(|source| CollectorError::Discovery {
            path: self.root.clone(),
            source,
        })?;

        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = format!(
            "{}/{}",
            root.trim_end_matches('/'),
            self.config.content.pattern.trim_start_matches('/')
        );

        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };
        let entries = glob::glob_with(&pattern, options).map_err(|source| CollectorError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CollectorError::Discovery {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;

            if path.is_file() {
                files.push(path);
            }
        }

        Ok(files)
    }

    /// Load a content file into a [`RawDocument`] with a site-relative path.
    pub fn load(&self, path: &Path) -> Result<RawDocument> {
        let content = fs::read_to_string(path).map_err(|source| CollectorError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        self.transformer
            .parser()
            .parse(&content, self.relative(path))
            .map_err(|e| CollectorError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Run one file through load, filter, transform and assemble.
    ///
    /// Returns `Ok(None)` for documents the eligibility filter drops.
    fn process(&self, path: &Path) -> Result<Option<FeedItem>> {
        let relative = normalize_separators(self.relative(path));
        if self.is_index(path) {
            debug!(path = %relative, "skipping index document");
            return Ok(None);
        }

        let doc = self.load(path)?;
        if !is_eligible(&doc, &self.config.site.locale) {
            debug!(
                path = %relative,
                lang = ?doc.frontmatter.lang,
                "skipping document outside publishing locale"
            );
            return Ok(None);
        }

        let transformed = self.transformer.transform(&doc);
        let item = assemble(&doc, transformed, &self.config, &self.author)?;
        debug!(path = %relative, link = %item.link, "assembled item");

        Ok(Some(item))
    }

    /// Whether a discovered file is an index document, judged on its
    /// site-relative path before the file is read.
    pub fn is_index(&self, path: &Path) -> bool {
        is_index_path(&normalize_separators(self.relative(path)))
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// Whether a document belongs in the feed.
///
/// Index documents are never published, and `lang` must equal the locale
/// exactly. A missing `lang` is not a match.
pub fn is_eligible(doc: &RawDocument, locale: &str) -> bool {
    !is_index_path(&doc.path_str()) && doc.frontmatter.has_locale(locale)
}

/// Build a feed item from an eligible document and its rendered output.
pub fn assemble(
    doc: &RawDocument,
    transformed: Transformed,
    config: &Config,
    author: &Author,
) -> std::result::Result<FeedItem, CoreError> {
    let raw_date = doc.frontmatter.date_text();
    let date = raw_date
        .as_deref()
        .and_then(parse_date)
        .ok_or_else(|| {
            CoreError::invalid_date(
                &doc.path,
                raw_date.clone().unwrap_or_else(|| "<missing>".to_string()),
            )
        })?;

    let fm = &doc.frontmatter;

    Ok(FeedItem {
        title: doc.title(),
        link: config.url_for(&permalink(&doc.path_str(), &config.content.prefix)),
        date,
        content: transformed.html,
        description: fm.description.clone(),
        authors: vec![author.clone()],
        image: transformed.image,
        tags: fm.tags.clone(),
        extra: fm.extra.clone(),
    })
}
