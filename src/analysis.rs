//! Text analysis.
//!
//! The same analyzer instance is used when documents are indexed and when
//! query clauses are parsed, so index terms and query terms are always
//! comparable.

pub mod analyzer;
pub mod token;
