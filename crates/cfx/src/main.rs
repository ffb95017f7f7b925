//! cfx CLI - Confluence page extractor.
//!
//! Provides commands for:
//! - `extract`: Export pages to a CSV table, optionally incrementally
//! - `spaces`: List spaces visible with the configured credentials

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExtractArgs, SpacesArgs};
use output::Output;

/// cfx - Confluence page extractor.
#[derive(Parser)]
#[command(name = "cfx", version, about)]
struct Cli {
    /// Enable debug logging (per-page requests).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract pages into a CSV table.
    Extract(ExtractArgs),
    /// List Confluence spaces.
    Spaces(SpacesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG for our crates, otherwise use RUST_LOG or default to INFO
    let filter = if cli.verbose {
        EnvFilter::new("info,cfx=debug,cfx_confluence=debug,cfx_output=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Extract(args) => args.execute(),
        Commands::Spaces(args) => args.execute(),
    };

    if let Err(err) = result {
        tracing::error!("{err:?}");
        output.error(&format!("Error: {err}"));
        std::process::exit(err.exit_code());
    }
}
