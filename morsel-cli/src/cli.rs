use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Morsel - in-memory JSON document search
#[derive(Parser)]
#[command(name = "morsel", version, about)]
pub struct Cli {
    /// Path to the data file: a JSON array of objects, or plain text with
    /// `--lines`.
    #[arg(long, env = "MORSEL_DATA")]
    pub data: PathBuf,

    /// Treat the data file as plain text, one document per line.
    #[arg(long)]
    pub lines: bool,

    /// Index configuration file (TOML, or JSON with a `.json` extension).
    #[arg(long, env = "MORSEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Execute a search query.
    Search(SearchCommand),
    /// Show a stored document.
    Doc {
        /// Document ID.
        id: u64,
    },
    /// Show index statistics.
    Stats,
    /// Start an interactive REPL session.
    Repl,
}

// --- Search ---

#[derive(Parser)]
pub struct SearchCommand {
    /// Query string, e.g. `pizza title:"wood fired"`.
    pub query: String,

    /// Field pattern for clauses without a field prefix.
    #[arg(long, default_value = "*")]
    pub default_field: String,

    /// How clauses combine: AND or OR.
    #[arg(long, default_value = "OR")]
    pub operator: String,

    /// Number of results to skip.
    #[arg(long, default_value_t = 0)]
    pub from: usize,

    /// Maximum number of results.
    #[arg(long, default_value_t = 10)]
    pub size: usize,

    /// Show how each score was computed.
    #[arg(long)]
    pub explain: bool,
}
