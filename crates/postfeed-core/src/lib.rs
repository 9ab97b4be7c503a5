//! postfeed Core Library
//!
//! Core types, configuration, front matter handling and the feed model shared by
//! every stage of the postfeed pipeline.

pub mod config;
pub mod content;
pub mod date;
pub mod error;
pub mod feed;
pub mod frontmatter;

pub use config::Config;
pub use content::RawDocument;
pub use error::{CoreError, Result};
pub use feed::{Author, FeedChannel, FeedFormat, FeedItem, FeedLinks, FeedModel};
pub use frontmatter::Frontmatter;
