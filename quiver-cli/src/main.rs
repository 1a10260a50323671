//! Quiver CLI - install prebuilt binary tools from GitHub releases.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::Command;

#[derive(Parser)]
#[command(name = "quiver")]
#[command(about = "Install prebuilt binary tools from GitHub releases", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Initialize console logging.
///
/// Defaults to INFO; override with RUST_LOG.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(err) = commands::run(cli.command) {
        tracing::error!("{}", err);
        process::exit(1);
    }
}
