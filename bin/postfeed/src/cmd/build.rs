//! Build command - generates the feeds

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use postfeed_core::Config;
use postfeed_generator::Builder;

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub domain: Option<String>,
}

impl Overrides {
    /// Apply overrides and re-validate.
    pub fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(output) = &self.output {
            config.feed.output_dir = output.to_string_lossy().to_string();
        }

        if let Some(name) = &self.name {
            config.feed.name = name.clone();
        }

        if let Some(domain) = &self.domain {
            tracing::info!(domain, "Overriding site domain from CLI");
            config.site.domain = domain.clone();
        }

        config.validated().wrap_err("Invalid configuration after overrides")
    }
}

/// Run the build command.
///
/// Writes all three feeds and then runs the configured asset copies.
pub fn run(config_path: &Path, root: &Path, overrides: &Overrides) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?root, ?overrides, "Starting build");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let config = overrides.apply(config)?;

    tracing::debug!(?config, "Loaded configuration");

    let builder = Builder::new(config, root);
    let output = builder.output_dir();
    let stats = builder.build().wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Discovered: {}", stats.discovered);
    println!("  Excluded:   {}", stats.excluded);
    println!("  Items:      {}", stats.items);
    println!("  Assets:     {}", stats.assets);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    for file in &stats.files {
        println!("              {}", file.display());
    }
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const CONFIG: &str = r#"
[site]
title = "Test"
domain = "https://example.com"

[author]
name = "Tester"
"#;

    #[test]
    fn test_overrides_apply() {
        let config = Config::from_toml_str(CONFIG).unwrap();
        let overrides = Overrides {
            output: Some(PathBuf::from("public")),
            name: Some("posts".to_string()),
            domain: Some("https://blog.example.org/".to_string()),
        };

        let config = overrides.apply(config).unwrap();

        assert_eq!(config.feed.output_dir, "public");
        assert_eq!(config.feed.name, "posts");
        assert_eq!(config.site.domain, "https://blog.example.org");
    }

    #[test]
    fn test_invalid_domain_override() {
        let config = Config::from_toml_str(CONFIG).unwrap();
        let overrides = Overrides {
            domain: Some("blog.example.org".to_string()),
            ..Default::default()
        };

        assert!(overrides.apply(config).is_err());
    }

    #[test]
    fn test_run_writes_feeds() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("postfeed.toml");
        fs::write(&config_path, CONFIG).unwrap();

        run(&config_path, dir.path(), &Overrides::default()).unwrap();

        assert!(dir.path().join("dist/feed.xml").is_file());
        assert!(dir.path().join("dist/feed.atom").is_file());
        assert!(dir.path().join("dist/feed.json").is_file());
    }

    #[test]
    fn test_run_missing_config() {
        let dir = TempDir::new().unwrap();
        let result = run(&dir.path().join("missing.toml"), dir.path(), &Overrides::default());
        assert!(result.is_err());
    }
}
