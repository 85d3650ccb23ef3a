//! `LsxKit` CLI - Command-line interface for LSX dialog documents

pub mod commands;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::config::LsxConfig;

#[derive(Parser)]
#[command(name = "lsxkit")]
#[command(about = "LsxKit: LSX dialog tools for BG3", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Run the `LsxKit` CLI
///
/// # Errors
/// Returns an error if configuration loading or the selected command fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => LsxConfig::load(path)?,
        None => LsxConfig::default(),
    };

    cli.command.execute(&config)?;

    Ok(())
}
