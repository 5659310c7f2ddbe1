//! In-memory document store.
//!
//! Documents are kept in id order; ids are dense and start at 1, so a lookup
//! is a bounds-checked index into the backing vector.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::data::{DocId, Document};
use crate::error::{MorselError, Result};

const FIRST_DOC_ID: DocId = 1;

/// Holds ingested documents keyed by their assigned id.
///
/// Documents are shared behind `Arc` so cloning a store (as happens when an
/// engine snapshot is copied on write) never copies field data.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents: Vec<Arc<Document>>,
    next_doc_id: DocId,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            next_doc_id: FIRST_DOC_ID,
        }
    }

    /// Store every mapping in `documents`, assigning sequential ids.
    ///
    /// Returns the assigned ids in input order. The caller validates the
    /// batch beforehand; this method itself cannot fail part-way.
    pub fn ingest(&mut self, documents: Vec<Map<String, Value>>) -> Vec<DocId> {
        let mut ids = Vec::with_capacity(documents.len());
        for fields in documents {
            let doc_id = self.next_doc_id;
            self.next_doc_id += 1;
            self.documents.push(Arc::new(Document::new(doc_id, fields)));
            ids.push(doc_id);
        }
        ids
    }

    /// Look up a document by id.
    pub fn get(&self, doc_id: DocId) -> Result<&Arc<Document>> {
        doc_id
            .checked_sub(FIRST_DOC_ID)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|offset| self.documents.get(offset))
            .ok_or_else(|| MorselError::not_found(doc_id))
    }

    /// The id the next ingested document will receive.
    pub fn next_doc_id(&self) -> DocId {
        self.next_doc_id
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
