use anyhow::Result;
use morsel::Engine;

use crate::cli::SearchCommand;
use crate::output::{self, OutputFormat};

/// Execute a search command.
pub fn run(engine: &Engine, cmd: &SearchCommand, format: OutputFormat) -> Result<()> {
    let results = engine.advanced_search_by_query_string(
        &cmd.default_field,
        &cmd.query,
        &cmd.operator,
        cmd.from,
        cmd.size,
        cmd.explain,
    )?;
    output::print_search_results(&results, format)
}
