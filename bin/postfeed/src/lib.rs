//! postfeed CLI Library
//!
//! Command implementations for the `postfeed` binary. The binary entry point
//! only parses arguments and dispatches here.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, copy)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use postfeed::cmd::build::{self, Overrides};
//!
//! build::run(Path::new("postfeed.toml"), Path::new("."), &Overrides::default()).unwrap();
//! ```

pub mod cmd;

pub use postfeed_core::Config;
pub use postfeed_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
