//! Markdown parser using pulldown-cmark.
//!
//! Rendering follows the conventions blog feeds usually expect: raw HTML passes
//! through, every newline inside a paragraph becomes `<br />`, and bare URLs
//! turn into links.

use std::{path::Path, sync::LazyLock};

use postfeed_core::{RawDocument, frontmatter::parse_frontmatter};
use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html};
use regex::Regex;
use thiserror::Error;

/// Bare URLs recognized in text.
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:https?://|www\.)[^\s<>"'`]+"#).expect("bare URL pattern is valid")
});

/// Characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?', ']', '\'', '"'];

/// Markdown parsing errors.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// Failed to parse frontmatter.
    #[error("frontmatter error: {0}")]
    Frontmatter(#[from] postfeed_core::CoreError),
}

/// Result type for markdown operations.
pub type Result<T> = std::result::Result<T, MarkdownError>;

/// Markdown parser.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self { options }
    }

    /// Split a source file into a [`RawDocument`].
    ///
    /// `path` is stored as given; callers pass the site-relative path.
    pub fn parse(&self, content: &str, path: &Path) -> Result<RawDocument> {
        let (frontmatter, body) = parse_frontmatter(content, path)?;
        Ok(RawDocument::new(path, frontmatter, body))
    }

    /// Render a markdown body to HTML.
    pub fn render(&self, body: &str) -> String {
        let parser = TextMergeStream::new(Parser::new_ext(body, self.options));
        let mut events = Vec::new();
        let mut link_depth = 0usize;
        let mut in_code_block = false;

        for event in parser {
            match &event {
                Event::Start(Tag::Link { .. } | Tag::Image { .. }) => link_depth += 1,
                Event::End(TagEnd::Link | TagEnd::Image) => {
                    link_depth = link_depth.saturating_sub(1);
                }
                Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
                Event::End(TagEnd::CodeBlock) => in_code_block = false,
                _ => {}
            }

            match event {
                Event::SoftBreak => events.push(Event::HardBreak),
                Event::Text(text) if link_depth == 0 && !in_code_block => {
                    linkify(text, &mut events);
                }
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(body.len() + body.len() / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Split a text event around bare URLs, wrapping each URL in a link.
fn linkify<'a>(text: CowStr<'a>, events: &mut Vec<Event<'a>>) {
    if !BARE_URL.is_match(&text) {
        events.push(Event::Text(text));
        return;
    }

    let mut last = 0;
    for found in BARE_URL.find_iter(&text) {
        let url = trim_url(found.as_str());
        if url == "www" || url.ends_with("://") {
            continue;
        }

        let start = found.start();
        if start > last {
            events.push(Event::Text(text[last..start].to_string().into()));
        }

        let href = if url.starts_with("www.") {
            format!("http://{url}")
        } else {
            url.to_string()
        };

        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(url.to_string().into()));
        events.push(Event::End(TagEnd::Link));

        last = start + url.len();
    }

    if last < text.len() {
        events.push(Event::Text(text[last..].to_string().into()));
    }
}

/// Strip sentence punctuation from the end of a matched URL. A closing
/// parenthesis is kept while it balances an opening one inside the URL.
fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        if let Some(rest) = url.strip_suffix(TRAILING_PUNCTUATION) {
            url = rest;
        } else if url.ends_with(')') && url.matches('(').count() < url.matches(')').count() {
            url = &url[..url.len() - 1];
        } else {
            return url;
        }
    }
}
