//! postfeed Parser Library
//!
//! Loading Markdown documents, rendering their bodies, and rewriting
//! root-relative URLs against the publishing domain.

pub mod markdown;
pub mod rewrite;

use std::path::Path;

pub use markdown::MarkdownParser;
use postfeed_core::RawDocument;
pub use rewrite::{absolutize_html, absolutize_url};
use thiserror::Error;

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Markdown parsing error.
    #[error("markdown error: {0}")]
    Markdown(#[from] markdown::MarkdownError),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Trait for content parsers.
pub trait ContentParser {
    /// Split source text into metadata and body.
    fn parse(&self, content: &str, path: &Path) -> Result<RawDocument>;

    /// Render a body to HTML.
    fn render(&self, body: &str) -> String;
}

impl ContentParser for MarkdownParser {
    fn parse(&self, content: &str, path: &Path) -> Result<RawDocument> {
        Ok(MarkdownParser::parse(self, content, path)?)
    }

    fn render(&self, body: &str) -> String {
        MarkdownParser::render(self, body)
    }
}

/// Rendered output of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// Body HTML with absolute `src`/`href` values.
    pub html: String,

    /// Metadata image, made absolute when it was root-relative.
    pub image: Option<String>,
}

/// Renders documents and rewrites their URLs for one publishing domain.
#[derive(Debug, Clone)]
pub struct ContentTransformer<P = MarkdownParser> {
    parser: P,
    domain: String,
}

impl ContentTransformer {
    /// Create a transformer using the Markdown parser.
    pub fn new(domain: impl Into<String>) -> Self {
        Self::with_parser(MarkdownParser::new(), domain)
    }
}

impl<P: ContentParser> ContentTransformer<P> {
    /// Create a transformer with a custom parser.
    pub fn with_parser(parser: P, domain: impl Into<String>) -> Self {
        Self {
            parser,
            domain: domain.into().trim_end_matches('/').to_string(),
        }
    }

    /// The underlying parser.
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Render a document body and rewrite both body and metadata image URLs.
    pub fn transform(&self, doc: &RawDocument) -> Transformed {
        let html = absolutize_html(&self.parser.render(&doc.body), &self.domain);
        let image = doc
            .frontmatter
            .image
            .as_deref()
            .map(|image| absolutize_url(image, &self.domain));

        Transformed { html, image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_rewrites_body_and_image() {
        let transformer = ContentTransformer::new("https://example.com");
        let doc = transformer
            .parser()
            .parse(
                "---\nimage: /hero.png\n---\n<img src=\"/x.png\">\n\n![alt](/y.png)",
                Path::new("pages/posts/a.md"),
            )
            .unwrap();

        let out = transformer.transform(&doc);

        assert_eq!(out.image.as_deref(), Some("https://example.com/hero.png"));
        assert!(out.html.contains(r#"<img src="https://example.com/x.png">"#));
        assert!(out.html.contains(r#"src="https://example.com/y.png""#));
        assert!(!out.html.contains(r#"src="/"#));
    }

    #[test]
    fn test_transform_keeps_absolute_image() {
        let transformer = ContentTransformer::new("https://example.com/");
        let doc = transformer
            .parser()
            .parse(
                "---\nimage: https://cdn.example/hero.png\n---\nbody",
                Path::new("a.md"),
            )
            .unwrap();

        let out = transformer.transform(&doc);
        assert_eq!(out.image.as_deref(), Some("https://cdn.example/hero.png"));
    }

    #[test]
    fn test_content_parser_trait() {
        let parser = MarkdownParser::new();
        let result = ContentParser::parse(&parser, "---\ntitle: Trait\n---\nContent", Path::new("t.md"));
        assert!(result.is_ok());
        assert!(ContentParser::render(&parser, "Content").contains("<p>Content</p>"));
    }

    #[test]
    fn test_frontmatter_error_surfaces() {
        let parser = MarkdownParser::new();
        let result = ContentParser::parse(&parser, "---\ntitle: [oops\n---\n", Path::new("bad.md"));
        assert!(matches!(result, Err(ParserError::Markdown(_))));
    }
}
