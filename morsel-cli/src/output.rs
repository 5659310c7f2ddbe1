use clap::ValueEnum;
use morsel::{Document, IndexStats, SearchResults};
use serde_json::{Map, Value};
use tabled::settings::Style;
use tabled::{Table, Tabled};

const MAX_VALUE_WIDTH: usize = 80;

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// JSON output.
    Json,
}

/// Print search results.
pub fn print_search_results(results: &SearchResults, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Table => {
            println!(
                "Total hits: {} (max score {:.4})",
                results.total_hits, results.max_score
            );
            if results.hits.is_empty() {
                println!("No results on this page.");
                return Ok(());
            }

            let rows: Vec<SearchResultRow> = results
                .hits
                .iter()
                .map(|hit| SearchResultRow {
                    id: hit.id,
                    score: format!("{:.4}", hit.score),
                    fields: format_fields_compact(&hit.fields),
                })
                .collect();

            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");

            for hit in &results.hits {
                if let Some(explanation) = &hit.explanation {
                    print!("\nDocument {}:\n{}", hit.id, explanation.to_pretty_string());
                }
            }
        }
    }
    Ok(())
}

/// Print a stored document.
pub fn print_document(
    id: u64,
    document: Option<&Document>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = match document {
                Some(doc) => serde_json::to_value(doc)?,
                None => Value::Null,
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            let Some(doc) = document else {
                println!("No document found for id {id}.");
                return Ok(());
            };
            let rows = vec![DocumentRow {
                id: doc.id,
                fields: format_fields_compact(&doc.fields),
            }];
            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
    Ok(())
}

/// Print index statistics.
pub fn print_stats(stats: &IndexStats, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(stats)?);
        }
        OutputFormat::Table => {
            println!("Document count: {}", stats.document_count);
            println!("Distinct terms: {}", stats.term_count);
            println!("Postings: {}", stats.posting_count);

            if !stats.fields.is_empty() {
                let rows: Vec<FieldStatsRow> = stats
                    .fields
                    .iter()
                    .map(|field| FieldStatsRow {
                        field: field.name.clone(),
                        documents: field.doc_count,
                        terms: field.term_count,
                        avg_length: format!("{:.2}", field.avg_length),
                    })
                    .collect();

                let table = Table::new(&rows).with(Style::rounded()).to_string();
                println!("\nIndexed fields:\n{table}");
            }
        }
    }
    Ok(())
}

// --- Helper types and functions ---

#[derive(Tabled)]
struct SearchResultRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Fields")]
    fields: String,
}

#[derive(Tabled)]
struct DocumentRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Fields")]
    fields: String,
}

#[derive(Tabled)]
struct FieldStatsRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Documents")]
    documents: usize,
    #[tabled(rename = "Terms")]
    terms: usize,
    #[tabled(rename = "Avg length")]
    avg_length: String,
}

/// Convert fields to a compact display string, in stored order.
fn format_fields_compact(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{k}: {}", format_value(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a JSON value for compact display.
fn format_value(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.chars().count() > MAX_VALUE_WIDTH {
        let truncated: String = text.chars().take(MAX_VALUE_WIDTH - 3).collect();
        format!("{truncated}...")
    } else {
        text
    }
}
