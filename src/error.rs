use thiserror::Error;

use crate::data::DocId;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, MorselError>;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum MorselError {
    /// The input handed to a load call was not an array of JSON objects.
    /// The store is left exactly as it was before the call.
    #[error("ingestion failed: {0}")]
    IngestionFailure(String),

    /// The input handed to a load call was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The query string could not be parsed.
    #[error("query syntax error: {0}")]
    QuerySyntaxError(String),

    /// The requested `from`/`size` window cannot be served.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// A document id that the store never assigned.
    #[error("document not found: {0}")]
    DocumentNotFound(DocId),

    /// Invalid engine configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MorselError {
    pub fn ingestion(msg: impl Into<String>) -> Self {
        MorselError::IngestionFailure(msg.into())
    }

    pub fn query_syntax(msg: impl Into<String>) -> Self {
        MorselError::QuerySyntaxError(msg.into())
    }

    pub fn invalid_pagination(msg: impl Into<String>) -> Self {
        MorselError::InvalidPagination(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        MorselError::InvalidConfig(msg.into())
    }

    pub fn not_found(doc_id: DocId) -> Self {
        MorselError::DocumentNotFound(doc_id)
    }
}
