//! `TokenBridge` CLI - Command-line interface for design token conversion

pub mod commands;
pub mod progress;

use crate::config::ConverterConfig;
use crate::converter::Converter;
use clap::Parser;
use commands::Commands;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "tokenbridge")]
#[command(about = "TokenBridge: design token conversion between JSON, Tana Paste and Affinity palettes", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file to use instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the `TokenBridge` CLI
///
/// # Errors
/// Returns an error if the config cannot be loaded or the command fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ConverterConfig::load_from(path)?,
        None => ConverterConfig::load(),
    };

    cli.command.execute(&Converter::new(config))?;

    Ok(())
}
