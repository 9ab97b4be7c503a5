//! JSON Feed 1.1 output.
//!
//! Metadata keys the pipeline does not interpret are kept on each item under
//! `_meta`, which JSON Feed reserves for extensions.

use std::collections::BTreeMap;

use postfeed_core::{Author, FeedFormat, FeedItem, FeedModel};
use serde::Serialize;
use tracing::debug;

use crate::feed::{FeedRenderer, Result};

/// JSON Feed version URL.
pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

/// JSON Feed 1.1 generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFeedGenerator;

#[derive(Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favicon: Option<&'a str>,
    authors: Vec<JsonAuthor<'a>>,
    language: &'a str,
    items: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    content_html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    date_published: String,
    authors: Vec<JsonAuthor<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    meta: Option<&'a BTreeMap<String, serde_yaml::Value>>,
}

impl<'a> From<&'a Author> for JsonAuthor<'a> {
    fn from(author: &'a Author) -> Self {
        Self {
            name: &author.name,
            url: author.link.as_deref(),
        }
    }
}

impl<'a> From<&'a FeedItem> for JsonItem<'a> {
    fn from(item: &'a FeedItem) -> Self {
        Self {
            id: &item.link,
            url: &item.link,
            title: &item.title,
            content_html: &item.content,
            summary: item.description.as_deref(),
            image: item.image.as_deref(),
            date_published: item.date.to_rfc3339(),
            authors: item.authors.iter().map(JsonAuthor::from).collect(),
            tags: (!item.tags.is_empty()).then_some(item.tags.as_slice()),
            meta: (!item.extra.is_empty()).then_some(&item.extra),
        }
    }
}

impl FeedRenderer for JsonFeedGenerator {
    fn format(&self) -> FeedFormat {
        FeedFormat::Json
    }

    fn render(&self, model: &FeedModel) -> Result<String> {
        debug!(count = model.items.len(), "generating JSON feed");

        let channel = &model.channel;
        let feed = JsonFeed {
            version: JSON_FEED_VERSION,
            title: &channel.title,
            home_page_url: &channel.link,
            feed_url: channel.feed_links.get(self.format()),
            description: &channel.description,
            icon: channel.image.as_deref(),
            favicon: channel.favicon.as_deref(),
            authors: vec![JsonAuthor::from(&channel.author)],
            language: &channel.language,
            items: model.items.iter().map(JsonItem::from).collect(),
        };

        Ok(serde_json::to_string_pretty(&feed)?)
    }
}
