//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use postfeed_core::Config;
use postfeed_generator::{
    ContentCollector,
    collector::{assemble, is_eligible},
};
use postfeed_parser::ContentTransformer;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
    eligible: usize,
    excluded: usize,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and loads every discovered document, reporting
/// every failure rather than stopping at the first one.
pub fn run(config_path: &Path, root: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, ?root, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    match Config::load_with_env(config_path) {
        Ok(config) => {
            println!("  ✓ Configuration valid");
            println!("\nChecking content files...");
            check_content(&config, root, &mut result);
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
        }
    }

    println!();
    println!("Summary:");
    println!("  Eligible: {}", result.eligible);
    println!("  Excluded: {}", result.excluded);
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn check_content(config: &Config, root: &Path, result: &mut ValidationResult) {
    let collector = ContentCollector::new(config.clone(), root);
    let transformer = ContentTransformer::new(config.domain());
    let author = postfeed_core::Author::from_config(config);

    let files = match collector.discover() {
        Ok(files) => files,
        Err(e) => {
            result.add_error(e.to_string());
            return;
        }
    };

    if files.is_empty() {
        result.add_warning(format!(
            "No files match content pattern {:?}",
            config.content.pattern
        ));
    }

    for path in &files {
        if collector.is_index(path) {
            result.excluded += 1;
            continue;
        }

        let doc = match collector.load(path) {
            Ok(doc) => doc,
            Err(e) => {
                result.add_error(e.to_string());
                continue;
            }
        };

        if !is_eligible(&doc, &config.site.locale) {
            result.excluded += 1;
            continue;
        }

        match assemble(&doc, transformer.transform(&doc), config, &author) {
            Ok(_) => result.eligible += 1,
            Err(e) => result.add_error(e.to_string()),
        }
    }

    if !files.is_empty() && result.eligible == 0 {
        result.add_warning(format!(
            "No documents are eligible for locale {:?}",
            config.site.locale
        ));
    }
}
