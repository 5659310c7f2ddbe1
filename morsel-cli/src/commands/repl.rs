use anyhow::{Context, Result, bail};
use morsel::{Engine, Operator, SearchRequest};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::output::{self, OutputFormat};

/// Search settings that persist across REPL commands.
#[derive(Debug, Clone, PartialEq)]
struct Session {
    default_field: String,
    operator: Operator,
    size: usize,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            default_field: "*".to_string(),
            operator: Operator::Or,
            size: 10,
        }
    }
}

impl Session {
    fn request(&self, query: &str, explain: bool) -> SearchRequest {
        SearchRequest::builder(query)
            .default_field(self.default_field.as_str())
            .operator(self.operator)
            .size(self.size)
            .explain(explain)
            .build()
    }

    /// Apply `set <name> <value>`.
    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "field" => {
                if value.is_empty() {
                    bail!("Usage: set field <pattern>");
                }
                self.default_field = value.to_string();
            }
            "operator" => {
                self.operator = value
                    .parse()
                    .with_context(|| format!("Invalid operator '{value}'"))?;
            }
            "size" => {
                self.size = value
                    .parse()
                    .with_context(|| format!("Invalid size '{value}'"))?;
            }
            other => bail!("Unknown setting '{other}'. Settings: field, operator, size"),
        }
        Ok(())
    }
}

/// Run the interactive REPL.
pub fn run(engine: &Engine, format: OutputFormat) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session::default();

    println!("Morsel REPL (type 'help' for commands, 'quit' to exit)");

    loop {
        let line = match rl.readline("morsel> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let result = match command {
            "help" => {
                print_help(&session);
                Ok(())
            }
            "quit" | "exit" => break,
            "search" | "explain" => {
                if rest.is_empty() {
                    eprintln!("Usage: {command} <query>");
                    continue;
                }
                search(engine, &session, rest, command == "explain", format)
            }
            "set" => {
                let (name, value) = rest.split_once(' ').unwrap_or((rest, ""));
                session.set(name, value.trim())
            }
            "doc" => rest
                .parse::<u64>()
                .context("Usage: doc <id>")
                .and_then(|id| output::print_document(id, engine.get_document(id).as_ref(), format)),
            "stats" => output::print_stats(&engine.stats(), format),
            _ => search(engine, &session, line, false, format),
        };

        if let Err(e) = result {
            eprintln!("Error: {e:#}");
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn search(
    engine: &Engine,
    session: &Session,
    query: &str,
    explain: bool,
    format: OutputFormat,
) -> Result<()> {
    let results = engine.search(&session.request(query, explain))?;
    output::print_search_results(&results, format)
}

fn print_help(session: &Session) {
    println!(
        "\
Available commands:
  search <query>               Search the index
  explain <query>              Search and show score explanations
  set field <pattern>          Default field pattern (now: {})
  set operator <AND|OR>        How clauses combine (now: {})
  set size <n>                 Results per page (now: {})
  doc <id>                     Show a stored document
  stats                        Show index statistics
  help                         Show this help
  quit                         Exit the REPL
Any other input is run as a search query.",
        session.default_field, session.operator, session.size
    );
}
