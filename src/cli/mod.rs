//! CLI command handlers

pub mod commands;

pub use commands::{analyze, permits, AnalyzeArgs, OutputFormat};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber; `RUST_LOG` overrides the default level
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "escrow_report=debug"
    } else {
        "escrow_report=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
