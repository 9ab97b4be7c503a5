//! Copy command - run the configured asset copies only

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use postfeed_core::Config;
use postfeed_generator::AssetCopier;

/// Run the copy command.
pub fn run(config_path: &Path, root: &Path) -> Result<()> {
    tracing::info!(?config_path, ?root, "Copying assets");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if config.assets.is_empty() {
        println!("  No [[assets]] entries configured");
        return Ok(());
    }

    let count = AssetCopier::new(root)
        .copy_all(&config.assets)
        .wrap_err("Asset copy failed")?;

    println!("  Copied {count} file(s)");
    for entry in &config.assets {
        println!("    {} -> {}", entry.from, entry.to);
    }

    Ok(())
}
