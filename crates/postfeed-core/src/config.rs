//! Feed pipeline configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for postfeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide channel settings.
    pub site: SiteConfig,

    /// Author identity shared by the channel and every item.
    pub author: AuthorConfig,

    /// Content discovery settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Feed output settings.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Static directories mirrored into the output.
    #[serde(default)]
    pub assets: Vec<AssetCopy>,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Channel title.
    pub title: String,

    /// Channel description.
    #[serde(default)]
    pub description: String,

    /// Publishing domain used for every absolute URL (e.g., "https://example.com").
    pub domain: String,

    /// Locale a document must declare to be published.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Feed id, defaults to the domain with a trailing slash.
    #[serde(default)]
    pub id: Option<String>,

    /// Canonical site link, defaults to the domain with a trailing slash.
    #[serde(default)]
    pub link: Option<String>,

    /// Copyright notice.
    #[serde(default)]
    pub copyright: Option<String>,

    /// Channel image URL.
    #[serde(default)]
    pub image: Option<String>,

    /// Favicon URL.
    #[serde(default)]
    pub favicon: Option<String>,
}

/// Author identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorConfig {
    /// Display name.
    pub name: String,

    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,

    /// Author homepage, defaults to the domain.
    #[serde(default)]
    pub link: Option<String>,
}

/// Content discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Glob pattern relative to the site root.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Path prefix stripped from document paths when building links.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Feed output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// File name stem for the three feed files.
    #[serde(default = "default_feed_name")]
    pub name: String,

    /// Output directory relative to the site root.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Maximum number of items, newest first.
    #[serde(default)]
    pub limit: Option<usize>,

    /// Public URLs of each feed format.
    #[serde(default)]
    pub links: FeedLinksConfig,
}

/// Per-format feed URL overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedLinksConfig {
    #[serde(default)]
    pub rss: Option<String>,
    #[serde(default)]
    pub atom: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
}

/// A directory mirrored into another one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCopy {
    /// Source directory relative to the site root.
    pub from: String,

    /// Destination directory relative to the site root.
    pub to: String,
}

// Default value functions
fn default_locale() -> String {
    "en".to_string()
}

fn default_pattern() -> String {
    "pages/posts/*.md".to_string()
}

fn default_prefix() -> String {
    "pages".to_string()
}

fn default_feed_name() -> String {
    "feed".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            prefix: default_prefix(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            name: default_feed_name(),
            output_dir: default_output_dir(),
            limit: None,
            links: FeedLinksConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str::<Config>(&content)
            .map_err(|e| {
                CoreError::config_with_source(
                    format!("Failed to parse config file: {}", path.display()),
                    e,
                )
            })?
            .validated()
    }

    /// Load configuration using the config crate, layering `POSTFEED__*` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("POSTFEED").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validated()
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Config>(content)?.validated()
    }

    /// Validate the configuration and normalize the domain.
    pub fn validated(mut self) -> Result<Self> {
        if self.site.domain.ends_with('/') {
            tracing::warn!(domain = %self.site.domain, "site.domain should not have a trailing slash");
            self.site.domain = self.site.domain.trim_end_matches('/').to_string();
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.domain.is_empty() {
            return Err(CoreError::config("site.domain cannot be empty"));
        }

        if !(self.site.domain.starts_with("http://") || self.site.domain.starts_with("https://")) {
            return Err(CoreError::config(
                "site.domain must start with http:// or https://",
            ));
        }

        if self.site.locale.is_empty() {
            return Err(CoreError::config("site.locale cannot be empty"));
        }

        if self.author.name.is_empty() {
            return Err(CoreError::config("author.name cannot be empty"));
        }

        if self.feed.name.is_empty() {
            return Err(CoreError::config("feed.name cannot be empty"));
        }

        Ok(())
    }

    /// The publishing domain without a trailing slash.
    pub fn domain(&self) -> &str {
        self.site.domain.trim_end_matches('/')
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.domain())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Lumen"
description = "Lumen's Blog"
domain = "https://lumen.example"
locale = "en"
copyright = "CC BY-NC-SA 4.0 2025 © Lumen"
image = "https://lumen.example/avatar.png"
favicon = "https://lumen.example/favicon.png"

[author]
name = "Lumen"
email = "lumen@example.com"

[content]
pattern = "content/blog/*.md"
prefix = "content"

[feed]
name = "rss"
output_dir = "public"
limit = 15

[feed.links]
json = "https://feeds.example/lumen.json"

[[assets]]
from = "public/assets/fonts"
to = "dist/assets/fonts"
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("postfeed.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Lumen");
        assert_eq!(config.site.domain, "https://lumen.example");
        assert_eq!(config.site.locale, "en");
        assert_eq!(config.author.email.as_deref(), Some("lumen@example.com"));
        assert!(config.author.link.is_none());
        assert_eq!(config.content.pattern, "content/blog/*.md");
        assert_eq!(config.content.prefix, "content");
        assert_eq!(config.feed.name, "rss");
        assert_eq!(config.feed.output_dir, "public");
        assert_eq!(config.feed.limit, Some(15));
        assert!(config.feed.links.rss.is_none());
        assert_eq!(
            config.feed.links.json.as_deref(),
            Some("https://feeds.example/lumen.json")
        );
        assert_eq!(config.assets.len(), 1);
        assert_eq!(config.assets[0].to, "dist/assets/fonts");
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_toml_str(
            r#"
[site]
title = "Minimal Site"
domain = "https://example.com"

[author]
name = "Someone"
"#,
        )
        .expect("parse config");

        assert_eq!(config.site.locale, "en");
        assert_eq!(config.site.description, "");
        assert_eq!(config.content.pattern, "pages/posts/*.md");
        assert_eq!(config.content.prefix, "pages");
        assert_eq!(config.feed.name, "feed");
        assert_eq!(config.feed.output_dir, "dist");
        assert!(config.feed.limit.is_none());
        assert!(config.assets.is_empty());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::from_toml_str(
            r#"
[site]
title = "Test"
domain = "https://example.com/"

[author]
name = "Someone"
"#,
        )
        .expect("parse config");

        assert_eq!(config.site.domain, "https://example.com");
        assert_eq!(
            config.url_for("/posts/hello"),
            "https://example.com/posts/hello"
        );
        assert_eq!(
            config.url_for("posts/hello"),
            "https://example.com/posts/hello"
        );
    }

    #[test]
    fn test_config_validation_empty_title() {
        let result = Config::from_toml_str(
            r#"
[site]
title = ""
domain = "https://example.com"

[author]
name = "Someone"
"#,
        );
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_bad_domain() {
        let result = Config::from_toml_str(
            r#"
[site]
title = "Test"
domain = "example.com"

[author]
name = "Someone"
"#,
        );
        assert!(result.unwrap_err().to_string().contains("http"));
    }

    #[test]
    fn test_config_missing_author() {
        let result = Config::from_toml_str(
            r#"
[site]
title = "Test"
domain = "https://example.com"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/postfeed.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("postfeed.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "Lumen");
        assert_eq!(config.feed.limit, Some(15));
    }
}
