//! Atom 1.0 output.

use atom_syndication::{
    CategoryBuilder, ContentBuilder, Entry, EntryBuilder, FeedBuilder, FixedDateTime,
    GeneratorBuilder, Link, LinkBuilder, Person, PersonBuilder, Text,
};
use postfeed_core::{Author, FeedFormat, FeedItem, FeedModel};
use tracing::debug;

use crate::feed::{FeedRenderer, Result, image_mime_type};

/// Atom 1.0 feed generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomGenerator;

impl FeedRenderer for AtomGenerator {
    fn format(&self) -> FeedFormat {
        FeedFormat::Atom
    }

    fn render(&self, model: &FeedModel) -> Result<String> {
        debug!(count = model.items.len(), "generating Atom feed");

        let channel = &model.channel;
        let entries: Vec<Entry> = model.items.iter().map(item_to_entry).collect();

        let alternate = LinkBuilder::default()
            .href(channel.link.clone())
            .rel("alternate".to_string())
            .build();
        let self_link = LinkBuilder::default()
            .href(channel.feed_links.get(self.format()).to_string())
            .rel("self".to_string())
            .mime_type(Some(self.format().mime_type().to_string()))
            .build();

        let feed = FeedBuilder::default()
            .title(Text::plain(channel.title.clone()))
            .id(channel.id.clone())
            .updated(fixed(channel.updated))
            .authors(vec![person(&channel.author)])
            .links(vec![alternate, self_link])
            .subtitle(Some(Text::plain(channel.description.clone())))
            .generator(Some(
                GeneratorBuilder::default()
                    .value(channel.generator.clone())
                    .build(),
            ))
            .lang(Some(channel.language.clone()))
            .logo(channel.image.clone())
            .icon(channel.favicon.clone())
            .rights(channel.copyright.clone().map(Text::plain))
            .entries(entries)
            .build();

        Ok(feed.to_string())
    }
}

fn fixed(date: chrono::DateTime<chrono::Utc>) -> FixedDateTime {
    date.fixed_offset()
}

fn person(author: &Author) -> Person {
    PersonBuilder::default()
        .name(author.name.clone())
        .email(author.email.clone())
        .uri(author.link.clone())
        .build()
}

fn item_to_entry(item: &FeedItem) -> Entry {
    let mut links: Vec<Link> = vec![
        LinkBuilder::default()
            .href(item.link.clone())
            .rel("alternate".to_string())
            .build(),
    ];

    if let Some(image) = &item.image {
        links.push(
            LinkBuilder::default()
                .href(image.clone())
                .rel("enclosure".to_string())
                .mime_type(Some(image_mime_type(image).to_string()))
                .build(),
        );
    }

    let content = ContentBuilder::default()
        .value(Some(item.content.clone()))
        .content_type(Some("html".to_string()))
        .build();

    EntryBuilder::default()
        .title(Text::plain(item.title.clone()))
        .id(item.link.clone())
        .updated(fixed(item.date))
        .published(Some(fixed(item.date)))
        .links(links)
        .summary(item.description.clone().map(Text::plain))
        .content(Some(content))
        .authors(item.authors.iter().map(person).collect::<Vec<_>>())
        .categories(
            item.tags
                .iter()
                .map(|tag| CategoryBuilder::default().term(tag.clone()).build())
                .collect::<Vec<_>>(),
        )
        .build()
}
