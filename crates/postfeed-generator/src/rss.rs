//! RSS 2.0 output.

use postfeed_core::{Author, FeedChannel, FeedFormat, FeedItem, FeedModel};
use rss::{
    CategoryBuilder, ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder, Item,
    ItemBuilder,
    extension::atom::{AtomExtensionBuilder, Link},
};
use tracing::debug;

use crate::feed::{FeedRenderer, Result, image_mime_type};

/// RSS 2.0 feed generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RssGenerator;

impl FeedRenderer for RssGenerator {
    fn format(&self) -> FeedFormat {
        FeedFormat::Rss
    }

    fn render(&self, model: &FeedModel) -> Result<String> {
        debug!(count = model.items.len(), "generating RSS feed");

        let channel = &model.channel;
        let items: Vec<Item> = model.items.iter().map(item_to_rss).collect();

        let mut builder = ChannelBuilder::default();
        builder
            .title(channel.title.clone())
            .link(channel.link.clone())
            .description(channel.description.clone())
            .language(Some(channel.language.clone()))
            .copyright(channel.copyright.clone())
            .generator(Some(channel.generator.clone()))
            .last_build_date(Some(channel.updated.to_rfc2822()))
            .atom_ext(Some(
                AtomExtensionBuilder::default()
                    .links(vec![self_link(channel, self.format())])
                    .build(),
            ))
            .items(items);

        if let Some(image) = &channel.image {
            builder.image(Some(
                ImageBuilder::default()
                    .url(image.clone())
                    .title(channel.title.clone())
                    .link(channel.link.clone())
                    .build(),
            ));
        }

        Ok(builder.build().to_string())
    }
}

fn self_link(channel: &FeedChannel, format: FeedFormat) -> Link {
    let mut link = Link::default();
    link.set_href(channel.feed_links.get(format).to_string());
    link.set_rel("self");
    link.set_mime_type(Some(format.mime_type().to_string()));
    link
}

/// RSS has a single author field in the `email (name)` form.
fn rss_author(author: &Author) -> String {
    match &author.email {
        Some(email) => format!("{email} ({})", author.name),
        None => author.name.clone(),
    }
}

fn item_to_rss(item: &FeedItem) -> Item {
    let guid = GuidBuilder::default()
        .value(item.link.clone())
        .permalink(true)
        .build();

    let mut builder = ItemBuilder::default();
    builder.title(Some(item.title.clone()));
    builder.link(Some(item.link.clone()));
    builder.guid(Some(guid));
    builder.pub_date(Some(item.date.to_rfc2822()));
    builder.content(Some(item.content.clone()));

    if let Some(desc) = &item.description {
        builder.description(Some(desc.clone()));
    }

    if let Some(author) = item.authors.first() {
        builder.author(Some(rss_author(author)));
    }

    if !item.tags.is_empty() {
        builder.categories(
            item.tags
                .iter()
                .map(|tag| CategoryBuilder::default().name(tag.clone()).build())
                .collect::<Vec<_>>(),
        );
    }

    if let Some(image) = &item.image {
        builder.enclosure(Some(
            EnclosureBuilder::default()
                .url(image.clone())
                .length("0".to_string())
                .mime_type(image_mime_type(image).to_string())
                .build(),
        ));
    }

    builder.build()
}
