use serde::{Deserialize, Serialize};

use crate::lexical::query::Operator;

/// Default page size of a [`SearchRequest`].
pub const DEFAULT_SIZE: usize = 10;

/// A query-string search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The query string.
    pub query: String,

    /// Field pattern for bare clauses. `None` uses the engine's configured
    /// default field.
    #[serde(default)]
    pub default_field: Option<String>,

    /// How clauses combine.
    #[serde(default)]
    pub operator: Operator,

    /// Number of ranked hits to skip.
    #[serde(default)]
    pub from: usize,

    /// Maximum number of hits to return. `None` returns every hit.
    #[serde(default = "default_size")]
    pub size: Option<usize>,

    /// Attach a score explanation to each returned hit.
    #[serde(default)]
    pub explain: bool,
}

fn default_size() -> Option<usize> {
    Some(DEFAULT_SIZE)
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            default_field: None,
            operator: Operator::Or,
            from: 0,
            size: default_size(),
            explain: false,
        }
    }

    pub fn builder(query: impl Into<String>) -> SearchRequestBuilder {
        SearchRequestBuilder::new(query)
    }
}

pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl SearchRequestBuilder {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            request: SearchRequest::new(query),
        }
    }

    pub fn default_field(mut self, field: impl Into<String>) -> Self {
        self.request.default_field = Some(field.into());
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.request.operator = operator;
        self
    }

    pub fn from(mut self, from: usize) -> Self {
        self.request.from = from;
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.request.size = Some(size);
        self
    }

    /// Return every hit from `from` on.
    pub fn all_hits(mut self) -> Self {
        self.request.size = None;
        self
    }

    pub fn explain(mut self, explain: bool) -> Self {
        self.request.explain = explain;
        self
    }

    pub fn build(self) -> SearchRequest {
        self.request
    }
}
