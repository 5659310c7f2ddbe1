//! Index snapshot and statistics.
//!
//! An [`IndexSnapshot`] pairs the document store with the inverted index built
//! from it. Snapshots are only ever mutated through an
//! [`IndexWriter`](inverted::writer::IndexWriter) while no reader can observe
//! them; searchers hold them behind an `Arc` and treat them as immutable.

pub mod inverted;

use serde::{Deserialize, Serialize};

use crate::data::{DocId, Document};
use crate::error::Result;
use crate::store::DocumentStore;

use self::inverted::InvertedIndex;

/// A consistent view of stored documents and their postings.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    store: DocumentStore,
    index: InvertedIndex,
}

impl IndexSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn document(&self, doc_id: DocId) -> Result<&Document> {
        self.store.get(doc_id).map(|doc| doc.as_ref())
    }

    /// Number of stored documents; the `N` of inverse document frequency.
    pub fn doc_count(&self) -> usize {
        self.store.len()
    }

    pub fn stats(&self) -> IndexStats {
        let fields: Vec<FieldSummary> = self
            .index
            .fields()
            .into_iter()
            .filter_map(|name| {
                let stats = self.index.field_stats(name)?;
                Some(FieldSummary {
                    name: name.to_string(),
                    doc_count: stats.doc_count,
                    term_count: self.index.field_term_count(name),
                    total_length: stats.total_length,
                    avg_length: stats.avg_length(),
                })
            })
            .collect();

        IndexStats {
            document_count: self.store.len(),
            next_doc_id: self.store.next_doc_id(),
            indexed_field_count: fields.len(),
            term_count: self.index.term_count(),
            posting_count: self.index.posting_count(),
            fields,
        }
    }
}

/// Summary statistics of an index snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub document_count: usize,
    pub next_doc_id: DocId,
    pub indexed_field_count: usize,
    pub term_count: usize,
    pub posting_count: usize,
    /// Per-field statistics, sorted by field name.
    pub fields: Vec<FieldSummary>,
}

/// Statistics of one indexed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub name: String,
    pub doc_count: usize,
    pub term_count: usize,
    pub total_length: u64,
    pub avg_length: f32,
}
