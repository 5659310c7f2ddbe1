pub mod config;
pub mod search;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::data::{DocId, Document};
use crate::error::{MorselError, Result};
use crate::lexical::index::inverted::writer::IndexWriter;
use crate::lexical::index::{IndexSnapshot, IndexStats};
use crate::lexical::query::Operator;
use crate::lexical::search::result::SearchResults;
use crate::lexical::search::searcher::Searcher;

use self::config::IndexConfig;
use self::search::SearchRequest;

/// In-memory search engine.
///
/// The engine owns a document store and its inverted index, published as an
/// immutable snapshot. Loads build the next snapshot under a write lock;
/// searches pin the current snapshot and run without holding any lock, so a
/// search never observes a half-applied load.
///
/// # Example
///
/// ```
/// use morsel::Engine;
///
/// let engine = Engine::new();
/// engine
///     .load_json_array(r#"[{"title": "pizza recipe"}, {"title": "pasta recipe"}]"#)
///     .unwrap();
///
/// let results = engine.search_by_query_string("pizza").unwrap();
/// assert_eq!(results.total_hits, 1);
/// assert_eq!(results.hits[0].fields["title"], "pizza recipe");
/// ```
pub struct Engine {
    config: Arc<IndexConfig>,
    state: RwLock<Arc<IndexSnapshot>>,
}

impl Engine {
    /// Create an empty engine with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(IndexConfig::default())
    }

    /// Create an empty engine with `config`.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: IndexConfig) -> Self {
        Self {
            config: Arc::new(config),
            state: RwLock::new(Arc::new(IndexSnapshot::new())),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Load documents from JSON text encoding an array of objects.
    ///
    /// Returns the number of documents loaded. On error nothing is loaded.
    pub fn load_json_array(&self, data: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(data)?;
        match value {
            Value::Array(items) => self.load_documents(items),
            other => Err(MorselError::ingestion(format!(
                "expected a JSON array of objects, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Load already-parsed documents. Every element must be a JSON object.
    ///
    /// The whole batch is checked before anything is stored, so a single bad
    /// element leaves the engine unchanged.
    pub fn load_documents(&self, documents: Vec<Value>) -> Result<usize> {
        let mut objects: Vec<Map<String, Value>> = Vec::with_capacity(documents.len());
        for (position, document) in documents.into_iter().enumerate() {
            match document {
                Value::Object(map) => objects.push(map),
                other => {
                    return Err(MorselError::ingestion(format!(
                        "element {position} is {}, expected an object",
                        json_kind(&other)
                    )));
                }
            }
        }
        Ok(self.commit(objects))
    }

    /// Load plain text, one document per non-empty line.
    ///
    /// Each line is trimmed and stored as the `title` field.
    pub fn load_text_lines(&self, data: &str) -> Result<usize> {
        let objects: Vec<Map<String, Value>> = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let mut fields = Map::new();
                fields.insert("title".to_string(), Value::String(line.to_string()));
                fields
            })
            .collect();
        Ok(self.commit(objects))
    }

    /// Index and publish a validated batch.
    fn commit(&self, documents: Vec<Map<String, Value>>) -> usize {
        if documents.is_empty() {
            return 0;
        }

        let mut state = self.state.write();
        // Clones the snapshot only if a searcher still holds it.
        let snapshot = Arc::make_mut(&mut state);
        let ids = IndexWriter::new(snapshot, &self.config).add_documents(documents);
        log::debug!(
            "loaded {} documents (ids {}..={}), store now holds {}",
            ids.len(),
            ids.first().copied().unwrap_or_default(),
            ids.last().copied().unwrap_or_default(),
            snapshot.doc_count()
        );
        ids.len()
    }

    /// A searcher pinned to the current snapshot.
    pub fn searcher(&self) -> Searcher {
        let snapshot = Arc::clone(&self.state.read());
        Searcher::new(snapshot, Arc::clone(&self.config))
    }

    /// Run a structured search request.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        let searcher = self.searcher();
        let default_field = request
            .default_field
            .as_deref()
            .unwrap_or(self.config.default_field.as_str());
        let query = searcher.parse(&request.query, default_field, request.operator)?;
        searcher.evaluate(&query, request.from, request.size, request.explain)
    }

    /// Search with the configured default field, OR semantics and no
    /// pagination window.
    pub fn search_by_query_string(&self, query_string: &str) -> Result<SearchResults> {
        let request = SearchRequest::builder(query_string).all_hits().build();
        self.search(&request)
    }

    /// Search with an explicit default field, operator and page window.
    ///
    /// `operator` is matched case-insensitively; anything other than `AND`
    /// means OR.
    pub fn advanced_search_by_query_string(
        &self,
        default_field: &str,
        query_string: &str,
        operator: &str,
        from: usize,
        size: usize,
        explain: bool,
    ) -> Result<SearchResults> {
        let request = SearchRequest::builder(query_string)
            .default_field(default_field)
            .operator(Operator::parse_lenient(operator))
            .from(from)
            .size(size)
            .explain(explain)
            .build();
        self.search(&request)
    }

    /// A copy of the stored document with id `doc_id`.
    pub fn get_document(&self, doc_id: DocId) -> Option<Document> {
        let state = self.state.read();
        state.store().get(doc_id).ok().map(|doc| doc.as_ref().clone())
    }

    pub fn stats(&self) -> IndexStats {
        self.state.read().stats()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.state.read().doc_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("documents", &self.len())
            .field("analyzer", &self.config.analyzer.name())
            .finish()
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "morsel engine v{}", crate::VERSION)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_load_and_lookup() {
        let engine = Engine::new();
        assert!(engine.is_empty());
        assert_eq!(
            engine
                .load_json_array(r#"[{"title": "a"}, {"title": "b"}]"#)
                .unwrap(),
            2
        );
        assert_eq!(engine.len(), 2);
        assert_eq!(engine.get_document(2).unwrap().get("title"), Some(&json!("b")));
        assert!(engine.get_document(3).is_none());
    }

    #[test]
    fn test_rejected_loads() {
        let engine = Engine::new();
        engine.load_json_array(r#"[{"title": "kept"}]"#).unwrap();

        assert!(matches!(
            engine.load_json_array("[{"),
            Err(MorselError::Json(_))
        ));
        assert!(matches!(
            engine.load_json_array(r#"{"title": "x"}"#),
            Err(MorselError::IngestionFailure(_))
        ));
        assert!(matches!(
            engine.load_json_array(r#"[{"title": "x"}, 42]"#),
            Err(MorselError::IngestionFailure(_))
        ));

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.stats().next_doc_id, 2);
        assert_eq!(engine.search_by_query_string("x").unwrap().total_hits, 0);
    }

    #[test]
    fn test_empty_array_is_accepted() {
        let engine = Engine::new();
        assert_eq!(engine.load_json_array("[]").unwrap(), 0);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_load_text_lines() {
        let engine = Engine::new();
        let loaded = engine
            .load_text_lines("Pizza Margherita\n\n   \n  Pasta Carbonara  \n")
            .unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(
            engine.get_document(2).unwrap().get("title"),
            Some(&json!("Pasta Carbonara"))
        );
        assert_eq!(engine.search_by_query_string("pasta").unwrap().ids(), vec![2]);
    }

    #[test]
    fn test_with_config_validates() {
        let config = IndexConfig::builder().bm25(1.2, 2.0).build();
        assert!(matches!(
            Engine::with_config(config),
            Err(MorselError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_configured_default_field() {
        let config = IndexConfig::builder().default_field("title").build();
        let engine = Engine::with_config(config).unwrap();
        engine
            .load_json_array(r#"[{"title": "pizza"}, {"body": "pizza"}]"#)
            .unwrap();
        assert_eq!(engine.search_by_query_string("pizza").unwrap().ids(), vec![1]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Engine::new().to_string(),
            format!("morsel engine v{}", crate::VERSION)
        );
    }
}
