use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::LsxConfig;

pub mod edit;
pub mod format;
pub mod handles;
pub mod normalize;
pub mod peek;
pub mod summarize;

#[derive(Subcommand)]
pub enum Commands {
    /// Report a document's region without parsing it
    Peek {
        /// LSX file(s)
        #[arg(required = true)]
        source: Vec<PathBuf>,

        /// Bytes to inspect (defaults to the configured peek window)
        #[arg(long)]
        bytes: Option<usize>,
    },

    /// Parse a document into its canonical JSON tree with region metadata
    Normalize {
        /// LSX file
        source: PathBuf,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Summarize a dialog document
    Summarize {
        /// Dialog LSX file
        source: PathBuf,

        /// Localization directory to resolve text handles from (repeatable)
        #[arg(short, long)]
        loca: Vec<PathBuf>,

        /// Print an indented transcript instead of JSON
        #[arg(short, long)]
        transcript: bool,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply edit requests to a dialog document
    Edit {
        /// Dialog LSX file
        source: PathBuf,

        /// JSON file holding an array of edit requests
        #[arg(short, long)]
        edits: PathBuf,

        /// Output file (defaults to overwriting the source)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write with LSLib conventions (BOM, CRLF)
        #[arg(long)]
        lslib: bool,
    },

    /// Re-serialize a document
    Format {
        /// LSX file
        source: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write with LSLib conventions (BOM, CRLF)
        #[arg(long, conflicts_with = "compact")]
        lslib: bool,

        /// Single line, no XML declaration
        #[arg(long)]
        compact: bool,
    },

    /// Build a handle map from localization documents
    Handles {
        /// Localization directory
        source: PathBuf,

        /// Print the text of these handles
        #[arg(long)]
        lookup: Vec<String>,

        /// Keep the first definition of a handle instead of the last
        #[arg(long)]
        first_wins: bool,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, config: &LsxConfig) -> anyhow::Result<()> {
        match self {
            Commands::Peek { source, bytes } => {
                peek::execute(source, bytes.unwrap_or(config.peek_bytes), config)
            }
            Commands::Normalize {
                source,
                output,
                pretty,
            } => normalize::execute(source, output.as_deref(), *pretty, config),
            Commands::Summarize {
                source,
                loca,
                transcript,
                output,
            } => summarize::execute(source, loca, *transcript, output.as_deref(), config),
            Commands::Edit {
                source,
                edits,
                output,
                lslib,
            } => edit::execute(source, edits, output.as_deref(), *lslib, config),
            Commands::Format {
                source,
                output,
                lslib,
                compact,
            } => format::execute(source, output.as_deref(), *lslib, *compact, config),
            Commands::Handles {
                source,
                lookup,
                first_wins,
            } => handles::execute(source, lookup, *first_wins, config),
        }
    }
}

/// Write command output to a file, or to stdout when no file is given.
fn emit(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
