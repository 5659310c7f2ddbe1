//! Positional inverted index.
//!
//! Layout: field -> term -> posting list, where each posting list is sorted by
//! ascending document id. Per-field length statistics are kept alongside for
//! length normalization during scoring.

pub mod writer;

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::data::DocId;

/// Occurrences of one term in one document's field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_freq: u32,
    /// Token positions of the term within the field, ascending.
    pub positions: Vec<u32>,
}

/// All postings of a (field, term) pair, sorted by `doc_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Number of distinct documents in this list.
    pub fn doc_freq(&self) -> usize {
        self.postings.len()
    }

    /// The posting for `doc_id`, if the document contains the term.
    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|i| &self.postings[i])
    }

    fn push(&mut self, posting: Posting) {
        debug_assert!(
            self.postings
                .last()
                .is_none_or(|last| last.doc_id < posting.doc_id),
            "postings must be appended in ascending doc id order"
        );
        self.postings.push(posting);
    }
}

/// Length statistics of one field across the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Number of documents with at least one token in this field.
    pub doc_count: usize,
    /// Total number of tokens in this field across all documents.
    pub total_length: u64,
}

impl FieldStats {
    pub fn avg_length(&self) -> f32 {
        if self.doc_count == 0 {
            0.0
        } else {
            self.total_length as f32 / self.doc_count as f32
        }
    }
}

#[derive(Debug, Clone, Default)]
struct FieldIndex {
    terms: AHashMap<String, PostingList>,
    lengths: AHashMap<DocId, u32>,
    total_length: u64,
}

/// The inverted index over all fields.
///
/// Each field is held behind an `Arc` so that copying the index on write only
/// duplicates the fields a new batch actually touches.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    fields: AHashMap<String, Arc<FieldIndex>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's analyzed field to the index.
    ///
    /// `terms` maps each normalized term to its positions in the field;
    /// `length` is the field's token count. Documents must be added in
    /// ascending id order.
    pub fn add_field(
        &mut self,
        field: &str,
        doc_id: DocId,
        length: u32,
        terms: AHashMap<String, Vec<u32>>,
    ) {
        if terms.is_empty() {
            return;
        }

        let field_index = Arc::make_mut(self.fields.entry(field.to_string()).or_default());
        for (term, positions) in terms {
            let posting = Posting {
                doc_id,
                term_freq: positions.len() as u32,
                positions,
            };
            field_index.terms.entry(term).or_default().push(posting);
        }
        field_index.lengths.insert(doc_id, length);
        field_index.total_length += u64::from(length);
    }

    /// Postings for `(field, term)`; empty when the pair is absent.
    pub fn postings(&self, field: &str, term: &str) -> &[Posting] {
        self.posting_list(field, term)
            .map(PostingList::postings)
            .unwrap_or(&[])
    }

    pub fn posting_list(&self, field: &str, term: &str) -> Option<&PostingList> {
        self.fields.get(field)?.terms.get(term)
    }

    /// Number of distinct documents containing `term` in `field`.
    pub fn document_frequency(&self, field: &str, term: &str) -> usize {
        self.posting_list(field, term)
            .map(PostingList::doc_freq)
            .unwrap_or(0)
    }

    pub fn field_stats(&self, field: &str) -> Option<FieldStats> {
        self.fields.get(field).map(|f| FieldStats {
            doc_count: f.lengths.len(),
            total_length: f.total_length,
        })
    }

    /// Token count of `field` in `doc_id`.
    pub fn field_length(&self, field: &str, doc_id: DocId) -> Option<u32> {
        self.fields.get(field)?.lengths.get(&doc_id).copied()
    }

    /// Indexed field names, sorted.
    pub fn fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of distinct terms in `field`.
    pub fn field_term_count(&self, field: &str) -> usize {
        self.fields.get(field).map(|f| f.terms.len()).unwrap_or(0)
    }

    /// Number of distinct (field, term) pairs.
    pub fn term_count(&self) -> usize {
        self.fields.values().map(|f| f.terms.len()).sum()
    }

    /// Total number of postings across all terms.
    pub fn posting_count(&self) -> usize {
        self.fields
            .values()
            .flat_map(|f| f.terms.values())
            .map(PostingList::doc_freq)
            .sum()
    }
}
