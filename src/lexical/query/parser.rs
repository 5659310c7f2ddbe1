//! Query string parser.
//!
//! Parses `title:pizza body:"wood fired"` style strings into a flat [`Query`].

use std::sync::Arc;

use pest::Parser;
use pest_derive::Parser;

use crate::analysis::analyzer::Analyzer;
use crate::engine::config::ALL_FIELDS;
use crate::error::{MorselError, Result};
use crate::lexical::query::{Clause, FieldPattern, Operator, Query};

/// Pest grammar parser for query strings.
#[derive(Parser)]
#[grammar = "lexical/query/parser.pest"]
struct QueryStringParser;

/// Parser for query strings.
///
/// # Supported Syntax
///
/// - `pizza`: term on the default field
/// - `title:pizza`: field-specific term
/// - `"wood fired"` / `body:"wood fired"`: phrase
/// - `author.*:ann`: every field matching a `*` wildcard
///
/// Clause text goes through the same analyzer as indexed values. A bare term
/// that analyzes into several tokens yields one term clause per token; a
/// phrase of a single token yields a term clause; text without any token
/// yields no clause at all.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use morsel::lexical::QueryParser;
/// use morsel::{Operator, StandardAnalyzer};
///
/// let parser = QueryParser::new(Arc::new(StandardAnalyzer::new()))
///     .with_default_field("title")
///     .with_operator(Operator::And);
///
/// let query = parser.parse(r#"pizza body:"wood fired""#).unwrap();
/// assert_eq!(query.clauses.len(), 2);
/// assert_eq!(query.to_string(), r#"title:pizza AND body:"wood fired""#);
/// ```
#[derive(Debug, Clone)]
pub struct QueryParser {
    analyzer: Arc<dyn Analyzer>,
    default_field: String,
    operator: Operator,
}

impl QueryParser {
    /// Create a parser binding bare clauses to every field, joined by OR.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            analyzer,
            default_field: ALL_FIELDS.to_string(),
            operator: Operator::Or,
        }
    }

    /// Set the field pattern for clauses without a field prefix.
    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = field.into();
        self
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Parse a query string.
    ///
    /// Fails with [`MorselError::QuerySyntaxError`] for an empty or
    /// all-whitespace string, an unterminated quote, or a field prefix
    /// without a value.
    pub fn parse(&self, query_str: &str) -> Result<Query> {
        if query_str.trim().is_empty() {
            return Err(MorselError::query_syntax("query string is empty"));
        }

        let pairs = QueryStringParser::parse(Rule::query, query_str)
            .map_err(|e| MorselError::query_syntax(format!("failed to parse query: {e}")))?;

        let default_field = FieldPattern::new(self.default_field.as_str())?;
        let mut clauses = Vec::new();

        for pair in pairs {
            if pair.as_rule() == Rule::query {
                for inner in pair.into_inner() {
                    if inner.as_rule() == Rule::clause {
                        self.parse_clause(inner, &default_field, &mut clauses)?;
                    }
                }
            }
        }

        let query = Query::new(self.operator, clauses);
        log::debug!("parsed query '{query_str}' as [{query}]");
        Ok(query)
    }

    /// Parse a single clause, appending zero or more clauses to `out`.
    fn parse_clause(
        &self,
        pair: pest::iterators::Pair<Rule>,
        default_field: &FieldPattern,
        out: &mut Vec<Clause>,
    ) -> Result<()> {
        let mut field: Option<FieldPattern> = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::field_prefix => {
                    for fp_inner in inner.into_inner() {
                        if fp_inner.as_rule() == Rule::field_name {
                            field = Some(FieldPattern::new(fp_inner.as_str())?);
                        }
                    }
                }
                Rule::term => {
                    let field = field.take().unwrap_or_else(|| default_field.clone());
                    for term in self.analyzer.terms(inner.as_str()) {
                        out.push(Clause::term(field.clone(), term));
                    }
                }
                Rule::phrase => {
                    let field = field.take().unwrap_or_else(|| default_field.clone());
                    let text = inner
                        .into_inner()
                        .find(|p| p.as_rule() == Rule::inner_text)
                        .map(|p| p.as_str())
                        .unwrap_or_default();
                    let mut terms = self.analyzer.terms(text);
                    match terms.len() {
                        0 => {}
                        1 => out.extend(terms.pop().map(|t| Clause::term(field, t))),
                        _ => out.push(Clause::phrase(field, terms)),
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}
