//! Feed model shared by all serializers.
//!
//! A [`FeedModel`] is assembled once per run and then only read. Every output
//! format borrows the same model, so the three files can never disagree about
//! which items were published or in which order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_yaml::Value;

use crate::config::Config;

/// Generator name written into every feed.
pub const GENERATOR: &str = "postfeed";

/// Syndication formats produced per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedFormat {
    /// RSS 2.0.
    Rss,
    /// Atom 1.0.
    Atom,
    /// JSON Feed 1.1.
    Json,
}

impl FeedFormat {
    /// All formats, in the order they are written.
    pub const ALL: [FeedFormat; 3] = [Self::Rss, Self::Atom, Self::Json];

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Rss => "xml",
            Self::Atom => "atom",
            Self::Json => "json",
        }
    }

    /// MIME type used in self links.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Rss => "application/rss+xml",
            Self::Atom => "application/atom+xml",
            Self::Json => "application/feed+json",
        }
    }
}

/// Author identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
    pub link: Option<String>,
}

impl Author {
    /// Build the configured author. The link defaults to the domain.
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.author.name.clone(),
            email: config.author.email.clone(),
            link: Some(
                config
                    .author
                    .link
                    .clone()
                    .unwrap_or_else(|| config.domain().to_string()),
            ),
        }
    }
}

/// One published document.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    /// Item title.
    pub title: String,

    /// Absolute URL, also used as the item id.
    pub link: String,

    /// Publication date.
    pub date: DateTime<Utc>,

    /// Rendered HTML with absolute resource URLs.
    pub content: String,

    /// Optional summary.
    pub description: Option<String>,

    /// Item authors.
    pub authors: Vec<Author>,

    /// Absolute hero image URL.
    pub image: Option<String>,

    /// Tags, exported as categories.
    pub tags: Vec<String>,

    /// Metadata keys the pipeline does not interpret.
    pub extra: BTreeMap<String, Value>,
}

/// Public URL of each feed format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLinks {
    pub rss: String,
    pub atom: String,
    pub json: String,
}

impl FeedLinks {
    /// Resolve configured links, defaulting to `{domain}/{name}.{ext}`.
    pub fn from_config(config: &Config) -> Self {
        let default_for =
            |format: FeedFormat| config.url_for(&format!("{}.{}", config.feed.name, format.extension()));
        let links = &config.feed.links;

        Self {
            rss: links.rss.clone().unwrap_or_else(|| default_for(FeedFormat::Rss)),
            atom: links.atom.clone().unwrap_or_else(|| default_for(FeedFormat::Atom)),
            json: links.json.clone().unwrap_or_else(|| default_for(FeedFormat::Json)),
        }
    }

    /// Link for a given format.
    pub fn get(&self, format: FeedFormat) -> &str {
        match format {
            FeedFormat::Rss => &self.rss,
            FeedFormat::Atom => &self.atom,
            FeedFormat::Json => &self.json,
        }
    }
}

/// Channel-level metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedChannel {
    pub title: String,
    pub description: String,
    pub id: String,
    pub link: String,
    pub copyright: Option<String>,
    pub feed_links: FeedLinks,
    pub author: Author,
    pub image: Option<String>,
    pub favicon: Option<String>,
    pub language: String,
    pub generator: String,
    /// Newest item date, or the build time for an empty feed.
    pub updated: DateTime<Utc>,
}

impl FeedChannel {
    /// Build the channel from configuration.
    pub fn from_config(config: &Config, updated: DateTime<Utc>) -> Self {
        let home = format!("{}/", config.domain());
        let site = &config.site;

        let description = if site.description.is_empty() {
            site.title.clone()
        } else {
            site.description.clone()
        };

        Self {
            title: site.title.clone(),
            description,
            id: site.id.clone().unwrap_or_else(|| home.clone()),
            link: site.link.clone().unwrap_or(home),
            copyright: site.copyright.clone(),
            feed_links: FeedLinks::from_config(config),
            author: Author::from_config(config),
            image: site.image.clone(),
            favicon: site.favicon.clone(),
            language: site.locale.clone(),
            generator: GENERATOR.to_string(),
            updated,
        }
    }
}

/// A frozen feed: channel plus items, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedModel {
    pub channel: FeedChannel,
    pub items: Vec<FeedItem>,
}

impl FeedModel {
    /// Merge configuration with already sorted items.
    ///
    /// Applies `feed.limit` after sorting, so the newest items are kept.
    pub fn build(config: &Config, mut items: Vec<FeedItem>) -> Self {
        if let Some(limit) = config.feed.limit {
            items.truncate(limit);
        }

        let updated = items
            .iter()
            .map(|item| item.date)
            .max()
            .unwrap_or_else(Utc::now);

        Self {
            channel: FeedChannel::from_config(config, updated),
            items,
        }
    }

    /// Item titles in feed order.
    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.title.as_str()).collect()
    }
}

/// Sort items by date, newest first. Equal dates keep their input order.
pub fn sort_items(items: &mut [FeedItem]) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
}
