mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use morsel::IndexConfig;

use crate::cli::{Cli, Command};
use crate::commands::{repl, search};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format;
    let config = match &cli.config {
        Some(path) => context::load_config(path)?,
        None => IndexConfig::default(),
    };
    let engine = context::load_engine(&cli.data, cli.lines, config)?;

    match cli.command {
        Command::Search(cmd) => search::run(&engine, &cmd, format),
        Command::Doc { id } => {
            let document = engine.get_document(id);
            output::print_document(id, document.as_ref(), format)
        }
        Command::Stats => output::print_stats(&engine.stats(), format),
        Command::Repl => repl::run(&engine, format),
    }
}
