//! postfeed Generator Library
//!
//! Feed pipeline for postfeed.
//!
//! # Modules
//!
//! - [`collector`] - Content discovery, filtering and item assembly
//! - [`feed`] - Shared renderer trait and feed file output
//! - [`rss`] - RSS 2.0 serialization
//! - [`atom`] - Atom 1.0 serialization
//! - [`json`] - JSON Feed 1.1 serialization
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod atom;
pub mod build;
pub mod collector;
pub mod feed;
pub mod json;
pub mod rss;

pub use assets::AssetCopier;
pub use atom::AtomGenerator;
pub use build::{BuildStats, Builder};
pub use collector::{ContentCollector, SiteContent};
pub use feed::{FeedOutputs, FeedRenderer, FeedWriter};
pub use json::JsonFeedGenerator;
pub use rss::RssGenerator;
