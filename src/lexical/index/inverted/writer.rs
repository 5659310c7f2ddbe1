//! Inverted index writer.
//!
//! The writer turns field mappings into positional postings and appends them,
//! together with the documents themselves, to an [`IndexSnapshot`].

use ahash::AHashMap;
use serde_json::{Map, Value};

use crate::data::{self, DocId};
use crate::engine::config::IndexConfig;
use crate::lexical::index::IndexSnapshot;

/// Position distance inserted between consecutive values of a multi-valued
/// field, so a phrase never matches across two array elements.
pub const POSITION_INCREMENT_GAP: u32 = 100;

/// Analyzed content of one field of one document.
#[derive(Debug, Default)]
struct FieldAccumulator {
    terms: AHashMap<String, Vec<u32>>,
    length: u32,
    next_position: u32,
}

/// Appends documents to a snapshot.
///
/// Every operation here is infallible: the caller validates its input first,
/// so a batch is either applied completely or not at all.
pub struct IndexWriter<'a> {
    snapshot: &'a mut IndexSnapshot,
    config: &'a IndexConfig,
}

impl<'a> IndexWriter<'a> {
    pub fn new(snapshot: &'a mut IndexSnapshot, config: &'a IndexConfig) -> Self {
        Self { snapshot, config }
    }

    /// Index and store a batch of documents, returning their assigned ids.
    pub fn add_documents(&mut self, documents: Vec<Map<String, Value>>) -> Vec<DocId> {
        let first_id = self.snapshot.store.next_doc_id();
        for (doc_id, fields) in (first_id..).zip(documents.iter()) {
            self.index(doc_id, fields);
        }

        let ids = self.snapshot.store.ingest(documents);
        debug_assert_eq!(ids.first().copied().unwrap_or(first_id), first_id);
        log::debug!(
            "indexed {} documents, {} terms across {} fields",
            ids.len(),
            self.snapshot.index.term_count(),
            self.snapshot.index.fields().len()
        );
        ids
    }

    /// Analyze every indexable leaf of `fields` and append its postings.
    ///
    /// Values of the same path (array elements) share one field, with
    /// [`POSITION_INCREMENT_GAP`] positions between them.
    pub fn index(&mut self, doc_id: DocId, fields: &Map<String, Value>) {
        let analyzer = self.config.analyzer.as_ref();
        let mut order: Vec<String> = Vec::new();
        let mut accumulators: AHashMap<String, FieldAccumulator> = AHashMap::new();

        for (path, value) in data::flatten(fields) {
            if !self.config.is_indexed(&path) {
                continue;
            }
            let Some(text) = value.indexable_text() else {
                continue;
            };
            let tokens = analyzer.analyze(&text);
            let Some(last) = tokens.last() else {
                continue;
            };
            let last_position = last.position;

            if !accumulators.contains_key(&path) {
                order.push(path.clone());
            }
            let acc = accumulators.entry(path).or_default();
            let base = acc.next_position;
            acc.length += tokens.len() as u32;
            acc.next_position = base + last_position + 1 + POSITION_INCREMENT_GAP;
            for token in tokens {
                acc.terms
                    .entry(token.text)
                    .or_default()
                    .push(base + token.position);
            }
        }

        for path in order {
            if let Some(acc) = accumulators.remove(&path) {
                self.snapshot
                    .index
                    .add_field(&path, doc_id, acc.length, acc.terms);
            }
        }
    }
}
