//! postfeed CLI
//!
//! Generates RSS 2.0, Atom 1.0 and JSON Feed 1.1 files from Markdown posts.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use postfeed::cmd::build::Overrides;

/// Command-line interface for postfeed.
#[derive(Parser)]
#[command(
    name = "postfeed",
    version,
    about = "Generate RSS, Atom and JSON feeds from Markdown posts"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "postfeed.toml")]
    config: std::path::PathBuf,

    /// Site root containing the content files
    #[arg(short, long, default_value = ".")]
    root: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Generate all feeds, then run the configured asset copies
    Build {
        /// Output directory, relative to the root
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Base name of the feed files
        #[arg(short, long)]
        name: Option<String>,
        /// Override the publishing domain (e.g., https://example.com)
        #[arg(long)]
        domain: Option<String>,
    },
    /// Validate configuration and content
    Check {
        /// Also fail when no document is eligible
        #[arg(long)]
        strict: bool,
    },
    /// Run the configured asset copies only
    Copy,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    postfeed::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            output,
            name,
            domain,
        } => {
            let overrides = Overrides {
                output,
                name,
                domain,
            };
            postfeed::cmd::build::run(&cli.config, &cli.root, &overrides)?;
        }
        Commands::Check { strict } => {
            postfeed::cmd::check::run(&cli.config, &cli.root, strict)?;
        }
        Commands::Copy => {
            postfeed::cmd::copy::run(&cli.config, &cli.root)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["postfeed", "build", "--output", "public"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("postfeed.toml"));
        assert_eq!(cli.root, std::path::PathBuf::from("."));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build {
                output,
                name,
                domain,
            } => {
                assert_eq!(output, Some(std::path::PathBuf::from("public")));
                assert!(name.is_none());
                assert!(domain.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_overrides() {
        let args = [
            "postfeed",
            "build",
            "--name",
            "posts",
            "--domain",
            "https://example.org",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build { name, domain, .. } => {
                assert_eq!(name.as_deref(), Some("posts"));
                assert_eq!(domain.as_deref(), Some("https://example.org"));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["postfeed", "check", "--strict"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { strict } => {
                assert!(strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_copy_command_parsing() {
        let args = ["postfeed", "-c", "site/feed.toml", "-r", "site", "copy"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("site/feed.toml"));
        assert_eq!(cli.root, std::path::PathBuf::from("site"));
        assert!(matches!(cli.command, Commands::Copy));
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["postfeed", "-vvv", "build"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let result = Cli::try_parse_from(["postfeed"]);
        assert!(result.is_err());
    }
}
