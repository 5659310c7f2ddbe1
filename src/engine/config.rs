use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::error::{MorselError, Result};

/// Field pattern that matches every indexed field.
pub const ALL_FIELDS: &str = "*";

/// Configuration for the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Per-field options, keyed by field path (`title`, `author.name`).
    ///
    /// Fields without an entry are indexed with a boost of 1.0.
    #[serde(default)]
    pub fields: HashMap<String, FieldConfig>,
    /// Default field pattern for bare query clauses in simple search.
    #[serde(default = "default_field")]
    pub default_field: String,
    /// BM25 scoring parameters.
    #[serde(default)]
    pub bm25: Bm25Config,
    /// Upper bound on `from + size`. `None` means unlimited.
    #[serde(default)]
    pub max_result_window: Option<usize>,
    /// Analyzer shared by indexing and query parsing.
    #[serde(skip, default = "default_analyzer")]
    pub analyzer: Arc<dyn Analyzer>,
}

fn default_field() -> String {
    ALL_FIELDS.to_string()
}

fn default_analyzer() -> Arc<dyn Analyzer> {
    Arc::new(StandardAnalyzer::new())
}

impl IndexConfig {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            default_field: default_field(),
            bm25: Bm25Config::default(),
            max_result_window: None,
            analyzer: default_analyzer(),
        }
    }

    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }

    /// Check scoring parameters, boosts and the default field.
    pub fn validate(&self) -> Result<()> {
        self.bm25.validate()?;
        for (name, field) in &self.fields {
            if name.is_empty() {
                return Err(MorselError::invalid_config("field name must not be empty"));
            }
            if !field.boost.is_finite() || field.boost < 0.0 {
                return Err(MorselError::invalid_config(format!(
                    "boost of field '{name}' must be a finite non-negative number, got {}",
                    field.boost
                )));
            }
        }
        if self.default_field.trim().is_empty() {
            return Err(MorselError::invalid_config("default field must not be empty"));
        }
        Ok(())
    }

    /// The options that apply to `path`.
    ///
    /// A nested path inherits the options of its closest configured ancestor,
    /// so configuring `author` also covers `author.name`.
    pub fn field_config(&self, path: &str) -> Option<&FieldConfig> {
        let mut current = path;
        loop {
            if let Some(config) = self.fields.get(current) {
                return Some(config);
            }
            match current.rfind('.') {
                Some(idx) => current = &current[..idx],
                None => return None,
            }
        }
    }

    pub fn is_indexed(&self, path: &str) -> bool {
        self.field_config(path).is_none_or(|c| c.indexed)
    }

    pub fn boost(&self, path: &str) -> f32 {
        self.field_config(path).map_or(1.0, |c| c.boost)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Options of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// If false the field is stored and returned in hits but never searched.
    #[serde(default = "default_indexed")]
    pub indexed: bool,
    /// Multiplier applied to every score contribution from this field.
    #[serde(default = "default_boost")]
    pub boost: f32,
}

fn default_indexed() -> bool {
    true
}

fn default_boost() -> f32 {
    1.0
}

impl FieldConfig {
    /// A field that is stored but not indexed.
    pub fn stored_only() -> Self {
        Self {
            indexed: false,
            ..Self::default()
        }
    }

    pub fn with_boost(boost: f32) -> Self {
        Self {
            boost,
            ..Self::default()
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            indexed: default_indexed(),
            boost: default_boost(),
        }
    }
}

/// BM25 parameters.
///
/// `b` defaults to 0 so a document's score never drops when the same term
/// occurs in it more often, regardless of field length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Config {
    /// Term frequency saturation.
    pub k1: f32,
    /// Field length normalization, in `[0, 1]`.
    pub b: f32,
}

impl Bm25Config {
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(MorselError::invalid_config(format!(
                "bm25 k1 must be a finite non-negative number, got {}",
                self.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(MorselError::invalid_config(format!(
                "bm25 b must be within [0, 1], got {}",
                self.b
            )));
        }
        Ok(())
    }
}

impl Default for Bm25Config {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.0 }
    }
}

#[derive(Default)]
pub struct IndexConfigBuilder {
    fields: HashMap<String, FieldConfig>,
    default_field: Option<String>,
    bm25: Bm25Config,
    max_result_window: Option<usize>,
    analyzer: Option<Arc<dyn Analyzer>>,
}

impl IndexConfigBuilder {
    pub fn add_field(mut self, name: impl Into<String>, config: FieldConfig) -> Self {
        self.fields.insert(name.into(), config);
        self
    }

    /// Store `name` without indexing it.
    pub fn add_stored_field(self, name: impl Into<String>) -> Self {
        self.add_field(name, FieldConfig::stored_only())
    }

    pub fn add_boosted_field(self, name: impl Into<String>, boost: f32) -> Self {
        self.add_field(name, FieldConfig::with_boost(boost))
    }

    pub fn default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = Some(field.into());
        self
    }

    pub fn bm25(mut self, k1: f32, b: f32) -> Self {
        self.bm25 = Bm25Config { k1, b };
        self
    }

    pub fn max_result_window(mut self, window: usize) -> Self {
        self.max_result_window = Some(window);
        self
    }

    pub fn analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn build(self) -> IndexConfig {
        IndexConfig {
            fields: self.fields,
            default_field: self.default_field.unwrap_or_else(default_field),
            bm25: self.bm25,
            max_result_window: self.max_result_window,
            analyzer: self.analyzer.unwrap_or_else(default_analyzer),
        }
    }
}
