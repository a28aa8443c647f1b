//! pathpick - Resolve file and folder picks into path strings
//!
//! pathpick provides:
//! - Root resolution for relative, absolute and multi-root workspace paths
//! - `${env:NAME}` substitution backed by an optional env file
//! - Interactive quick-select browsing with filters
//! - Native dialog picking (optional `native-dialog` feature)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backends;
mod cli;
mod core;
mod env;
mod flows;
mod workspace;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries only the picked value
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli::run(cli)
}
