//! Search result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data::DocId;
use crate::lexical::search::explanation::Explanation;

/// A single matching document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: DocId,
    pub score: f32,
    /// The document's fields as ingested, in their original order.
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Number of matching documents, independent of the page window.
    pub total_hits: usize,
    /// Highest score among all matching documents, 0 when nothing matched.
    pub max_score: f32,
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    pub fn empty() -> Self {
        Self {
            total_hits: 0,
            max_score: 0.0,
            hits: Vec::new(),
        }
    }

    /// Ids of the hits on this page, in rank order.
    pub fn ids(&self) -> Vec<DocId> {
        self.hits.iter().map(|h| h.id).collect()
    }
}

impl Default for SearchResults {
    fn default() -> Self {
        Self::empty()
    }
}
