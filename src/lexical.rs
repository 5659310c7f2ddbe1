//! Lexical search implementation using inverted indexes.
//!
//! # Module Structure
//!
//! - `index`: inverted index, index writer and the immutable snapshot searched by queries
//! - `query`: query model and the query-string parser
//! - `search`: scoring, query evaluation, explanations and result assembly

pub mod index;
pub mod query;
pub mod search;

// Re-exports
pub use index::inverted::writer::IndexWriter;
pub use index::inverted::{InvertedIndex, Posting, PostingList};
pub use index::{IndexSnapshot, IndexStats};
pub use query::parser::QueryParser;
