//! Query model.
//!
//! A [`Query`] is a flat list of [`Clause`]s joined by a single [`Operator`].
//! It is plain data: it holds no reference to an index and can be evaluated
//! against any number of snapshots.

pub mod parser;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MorselError, Result};
use crate::lexical::index::inverted::InvertedIndex;

/// How clause matches combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Every clause must match.
    And,
    /// At least one clause must match.
    #[default]
    Or,
}

impl Operator {
    /// Parse an operator name the way the search entry points accept it:
    /// `AND` in any case selects [`Operator::And`], anything else selects
    /// [`Operator::Or`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().parse() {
            Ok(op) => op,
            Err(_) => {
                log::warn!("unknown operator '{s}', falling back to OR");
                Operator::Or
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

impl FromStr for Operator {
    type Err = MorselError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("and") {
            Ok(Operator::And)
        } else if s.eq_ignore_ascii_case("or") {
            Ok(Operator::Or)
        } else {
            Err(MorselError::query_syntax(format!(
                "unknown operator '{s}', expected AND or OR"
            )))
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field name, possibly containing `*` wildcards.
///
/// Wildcards match any run of characters, including `.` and the empty run,
/// so `*` alone matches every field and `author.*` every nested author field.
#[derive(Clone)]
pub struct FieldPattern {
    pattern: String,
    regex: Option<Arc<Regex>>,
}

impl FieldPattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(MorselError::query_syntax("field name must not be empty"));
        }

        let regex = if pattern.contains('*') {
            let compiled = Self::compile_pattern(&pattern);
            let regex = Regex::new(&compiled).map_err(|e| {
                MorselError::query_syntax(format!("invalid field pattern '{pattern}': {e}"))
            })?;
            Some(Arc::new(regex))
        } else {
            None
        };

        Ok(Self { pattern, regex })
    }

    /// Translate a glob into an anchored regex.
    fn compile_pattern(pattern: &str) -> String {
        let escaped: Vec<String> = pattern.split('*').map(regex::escape).collect();
        format!("^{}$", escaped.join(".*"))
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_wildcard(&self) -> bool {
        self.regex.is_some()
    }

    pub fn matches(&self, field: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(field),
            None => self.pattern == field,
        }
    }

    /// The indexed fields this pattern selects, sorted by name.
    ///
    /// A literal name always expands to itself, even if nothing was indexed
    /// under it yet; its postings are then simply empty.
    pub fn expand<'a>(&'a self, index: &'a InvertedIndex) -> Vec<&'a str> {
        if self.is_wildcard() {
            index
                .fields()
                .into_iter()
                .filter(|field| self.matches(field))
                .collect()
        } else {
            vec![self.pattern.as_str()]
        }
    }
}

impl fmt::Debug for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldPattern").field(&self.pattern).finish()
    }
}

impl fmt::Display for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for FieldPattern {}

impl Serialize for FieldPattern {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.pattern)
    }
}

impl<'de> Deserialize<'de> for FieldPattern {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        Self::new(pattern).map_err(serde::de::Error::custom)
    }
}

/// What a clause looks for within its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    /// A single normalized term.
    Term(String),
    /// Normalized terms that must occur at consecutive positions.
    Phrase(Vec<String>),
}

impl ClauseKind {
    pub fn terms(&self) -> &[String] {
        match self {
            ClauseKind::Term(term) => std::slice::from_ref(term),
            ClauseKind::Phrase(terms) => terms,
        }
    }
}

/// One field-scoped condition of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub field: FieldPattern,
    pub kind: ClauseKind,
}

impl Clause {
    pub fn term(field: FieldPattern, term: impl Into<String>) -> Self {
        Self {
            field,
            kind: ClauseKind::Term(term.into()),
        }
    }

    pub fn phrase(field: FieldPattern, terms: Vec<String>) -> Self {
        Self {
            field,
            kind: ClauseKind::Phrase(terms),
        }
    }

    /// Human readable form, as used in score explanations.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ClauseKind::Term(term) => write!(f, "{}:{}", self.field, term),
            ClauseKind::Phrase(terms) => write!(f, "{}:\"{}\"", self.field, terms.join(" ")),
        }
    }
}

/// A flat boolean query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    pub operator: Operator,
    pub clauses: Vec<Clause>,
}

impl Query {
    pub fn new(operator: Operator, clauses: Vec<Clause>) -> Self {
        Self { operator, clauses }
    }

    /// A query without clauses; it matches nothing.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!(" {} ", self.operator);
        let parts: Vec<String> = self.clauses.iter().map(Clause::description).collect();
        f.write_str(&parts.join(&separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;

    fn field(name: &str) -> FieldPattern {
        FieldPattern::new(name).unwrap()
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!("AND".parse::<Operator>().unwrap(), Operator::And);
        assert_eq!("or".parse::<Operator>().unwrap(), Operator::Or);
        assert!("XOR".parse::<Operator>().is_err());

        assert_eq!(Operator::parse_lenient(" and "), Operator::And);
        assert_eq!(Operator::parse_lenient("OR"), Operator::Or);
        assert_eq!(Operator::parse_lenient("whatever"), Operator::Or);
        assert_eq!(Operator::parse_lenient(""), Operator::Or);
    }

    #[test]
    fn test_field_pattern_matching() {
        assert!(field("title").matches("title"));
        assert!(!field("title").matches("subtitle"));

        let all = field("*");
        assert!(all.is_wildcard());
        assert!(all.matches("title"));
        assert!(all.matches("author.name"));

        let nested = field("author.*");
        assert!(nested.matches("author.name"));
        assert!(!nested.matches("author"));
        assert!(!nested.matches("authorXname"));

        let suffix = field("*_text");
        assert!(suffix.matches("body_text"));
        assert!(!suffix.matches("body_text2"));
    }

    #[test]
    fn test_field_pattern_rejects_empty() {
        assert!(matches!(
            FieldPattern::new(""),
            Err(MorselError::QuerySyntaxError(_))
        ));
    }

    #[test]
    fn test_expand_over_indexed_fields() {
        let mut index = InvertedIndex::new();
        for name in ["title", "body", "author.name"] {
            let terms: AHashMap<String, Vec<u32>> = [("x".to_string(), vec![0])].into();
            index.add_field(name, 1, 1, terms);
        }

        assert_eq!(
            field("*").expand(&index),
            vec!["author.name", "body", "title"]
        );
        assert_eq!(field("t*").expand(&index), vec!["title"]);
        assert_eq!(field("missing").expand(&index), vec!["missing"]);
        assert!(field("z*").expand(&index).is_empty());
    }

    #[test]
    fn test_clause_description() {
        assert_eq!(Clause::term(field("title"), "pizza").description(), "title:pizza");
        assert_eq!(
            Clause::phrase(field("body"), vec!["new".into(), "york".into()]).description(),
            "body:\"new york\""
        );
    }

    #[test]
    fn test_query_display_and_serde() {
        let query = Query::new(
            Operator::And,
            vec![
                Clause::term(field("title"), "pizza"),
                Clause::term(field("*"), "pasta"),
            ],
        );
        assert_eq!(query.to_string(), "title:pizza AND *:pasta");

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["operator"], "AND");
        assert_eq!(json["clauses"][0]["field"], "title");
        assert_eq!(json["clauses"][0]["kind"]["term"], "pizza");

        let decoded: Query = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, query);
        assert!(decoded.clauses[1].field.is_wildcard());
    }
}
