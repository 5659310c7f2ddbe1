//! # Morsel
//!
//! A small in-memory full-text search engine for JSON documents.
//!
//! ## Features
//!
//! - All-or-nothing bulk loading of JSON object arrays
//! - Inverted index with positional postings
//! - Query-string syntax with field prefixes, phrases and field wildcards
//! - BM25 scoring with per-hit score explanations
//! - Snapshot isolation between loading and searching

pub mod analysis;
mod data;
mod engine;
mod error;
pub mod lexical;
pub mod store;

// Re-exports for the public API
pub use analysis::analyzer::{Analyzer, StandardAnalyzer};
#[cfg(feature = "stemmers")]
pub use analysis::analyzer::StemmingAnalyzer;
pub use data::{DocId, Document};
pub use engine::Engine;
pub use engine::config::{Bm25Config, FieldConfig, IndexConfig, IndexConfigBuilder};
pub use engine::search::{SearchRequest, SearchRequestBuilder};
pub use error::{MorselError, Result};
pub use lexical::index::IndexStats;
pub use lexical::query::{Clause, ClauseKind, FieldPattern, Operator, Query};
pub use lexical::search::explanation::Explanation;
pub use lexical::search::result::{SearchHit, SearchResults};
pub use lexical::search::searcher::Searcher;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
