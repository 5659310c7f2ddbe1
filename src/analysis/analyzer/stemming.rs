//! English stemming on top of the standard analyzer.
//!
//! Enabled with the `stemmers` feature.

use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::analysis::token::Token;

/// [`StandardAnalyzer`] followed by the Snowball English (Porter2) stemmer.
///
/// Positions are those of the standard analyzer; stemming only rewrites the
/// token text, so phrase matching is unaffected.
///
/// ```
/// use std::sync::Arc;
/// use morsel::{Engine, IndexConfig, StemmingAnalyzer};
///
/// let config = IndexConfig::builder()
///     .analyzer(Arc::new(StemmingAnalyzer::new()))
///     .build();
/// let engine = Engine::with_config(config).unwrap();
/// engine.load_json_array(r#"[{"title": "pizza recipe"}]"#).unwrap();
///
/// assert_eq!(engine.search_by_query_string("recipes").unwrap().total_hits, 1);
/// ```
pub struct StemmingAnalyzer {
    standard: StandardAnalyzer,
    stemmer: Stemmer,
}

impl StemmingAnalyzer {
    pub fn new() -> Self {
        Self {
            standard: StandardAnalyzer::new(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for StemmingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StemmingAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemmingAnalyzer")
            .field("algorithm", &"english")
            .finish()
    }
}

impl Analyzer for StemmingAnalyzer {
    fn analyze(&self, text: &str) -> Vec<Token> {
        self.standard
            .analyze(text)
            .into_iter()
            .map(|token| {
                let stem = self.stemmer.stem(&token.text).into_owned();
                Token::new(stem, token.position)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "standard_with_english_stemmer"
    }
}
