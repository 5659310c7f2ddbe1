//! Query evaluation over a pinned index snapshot.

use std::sync::Arc;

use ahash::AHashMap;

use crate::data::DocId;
use crate::engine::config::IndexConfig;
use crate::error::{MorselError, Result};
use crate::lexical::index::IndexSnapshot;
use crate::lexical::index::inverted::{InvertedIndex, Posting};
use crate::lexical::query::parser::QueryParser;
use crate::lexical::query::{Clause, ClauseKind, Operator, Query};
use crate::lexical::search::explanation::Explanation;
use crate::lexical::search::result::{SearchHit, SearchResults};
use crate::lexical::search::scorer::BM25Scorer;

/// Inverse document frequency of one query term in one field.
#[derive(Debug)]
struct TermIdf<'a> {
    term: &'a str,
    doc_freq: usize,
    idf: f32,
}

/// Scoring inputs shared by every document a clause matches in one field.
#[derive(Debug)]
struct FieldTarget<'a> {
    field: &'a str,
    boost: f32,
    avg_length: f32,
    /// Sum of the term idfs, added in phrase order.
    idf: f32,
    terms: Vec<TermIdf<'a>>,
}

/// Evaluates queries against one immutable snapshot.
///
/// A searcher keeps its snapshot alive for as long as it exists, so results
/// stay consistent even while the engine loads more documents.
#[derive(Debug, Clone)]
pub struct Searcher {
    snapshot: Arc<IndexSnapshot>,
    config: Arc<IndexConfig>,
    scorer: BM25Scorer,
}

impl Searcher {
    pub fn new(snapshot: Arc<IndexSnapshot>, config: Arc<IndexConfig>) -> Self {
        let scorer = BM25Scorer::new(config.bm25, snapshot.doc_count());
        Self {
            snapshot,
            config,
            scorer,
        }
    }

    pub fn snapshot(&self) -> &IndexSnapshot {
        &self.snapshot
    }

    pub fn doc_count(&self) -> usize {
        self.snapshot.doc_count()
    }

    /// Parse `query_str` with this searcher's analyzer.
    pub fn parse(
        &self,
        query_str: &str,
        default_field: &str,
        operator: Operator,
    ) -> Result<Query> {
        QueryParser::new(Arc::clone(&self.config.analyzer))
            .with_default_field(default_field)
            .with_operator(operator)
            .parse(query_str)
    }

    /// Evaluate `query` and return the page starting at rank `from`.
    ///
    /// `size = None` returns every hit from `from` on, bounded by the
    /// configured result window if there is one.
    pub fn evaluate(
        &self,
        query: &Query,
        from: usize,
        size: Option<usize>,
        explain: bool,
    ) -> Result<SearchResults> {
        let size = self.check_window(from, size)?;

        let ranked = self.rank(query);
        let total_hits = ranked.len();
        let max_score = ranked.first().map_or(0.0, |&(_, score)| score);

        let window = ranked
            .into_iter()
            .skip(from)
            .take(size.unwrap_or(usize::MAX));

        let mut hits = Vec::new();
        for (doc_id, score) in window {
            let document = self.snapshot.document(doc_id)?;
            let explanation = if explain {
                self.explain(query, doc_id)
            } else {
                None
            };
            hits.push(SearchHit {
                id: doc_id,
                score,
                fields: document.fields.clone(),
                explanation,
            });
        }

        log::debug!(
            "query [{query}] matched {total_hits} documents, returning {} from {from}",
            hits.len()
        );

        Ok(SearchResults {
            total_hits,
            max_score,
            hits,
        })
    }

    /// Number of documents matching `query`.
    pub fn count(&self, query: &Query) -> usize {
        self.matches(query).len()
    }

    /// Validate the page window and resolve an unbounded size against the
    /// configured result window.
    fn check_window(&self, from: usize, size: Option<usize>) -> Result<Option<usize>> {
        let limit = self.config.max_result_window;
        match size {
            Some(size) => {
                if let Some(limit) = limit
                    && from.saturating_add(size) > limit
                {
                    return Err(MorselError::invalid_pagination(format!(
                        "from ({from}) + size ({size}) must be at most {limit}"
                    )));
                }
                Ok(Some(size))
            }
            None => match limit {
                Some(limit) if from > limit => Err(MorselError::invalid_pagination(format!(
                    "from must be at most {limit}, got {from}"
                ))),
                Some(limit) => Ok(Some(limit - from)),
                None => Ok(None),
            },
        }
    }

    /// All matching documents, by descending score then ascending id.
    fn rank(&self, query: &Query) -> Vec<(DocId, f32)> {
        let mut ranked: Vec<(DocId, f32)> = self.matches(query).into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// Combine per-clause scores according to the query operator.
    ///
    /// Scores of one document are added in clause order.
    fn matches(&self, query: &Query) -> AHashMap<DocId, f32> {
        let per_clause: Vec<AHashMap<DocId, f32>> = query
            .clauses
            .iter()
            .map(|clause| self.clause_scores(clause))
            .collect();

        match query.operator {
            Operator::Or => {
                let mut combined: AHashMap<DocId, f32> = AHashMap::new();
                for scores in &per_clause {
                    for (&doc_id, &score) in scores {
                        *combined.entry(doc_id).or_insert(0.0) += score;
                    }
                }
                combined
            }
            Operator::And => {
                let Some(smallest) = per_clause.iter().min_by_key(|scores| scores.len()) else {
                    return AHashMap::new();
                };
                smallest
                    .keys()
                    .filter_map(|doc_id| {
                        per_clause
                            .iter()
                            .try_fold(0.0_f32, |acc, scores| {
                                scores.get(doc_id).map(|&s| acc + s)
                            })
                            .map(|score| (*doc_id, score))
                    })
                    .collect()
            }
        }
    }

    fn index(&self) -> &InvertedIndex {
        self.snapshot.index()
    }

    /// Resolve the fields a clause can match in, with their shared scoring
    /// inputs. Fields where some clause term never occurs are left out.
    fn targets<'a>(&'a self, clause: &'a Clause) -> Vec<FieldTarget<'a>> {
        let index = self.index();
        let mut targets = Vec::new();

        for field in clause.field.expand(index) {
            let terms: Vec<TermIdf<'a>> = clause
                .kind
                .terms()
                .iter()
                .map(|term| {
                    let doc_freq = index.document_frequency(field, term);
                    TermIdf {
                        term: term.as_str(),
                        doc_freq,
                        idf: self.scorer.idf(doc_freq),
                    }
                })
                .collect();
            if terms.is_empty() || terms.iter().any(|t| t.doc_freq == 0) {
                continue;
            }

            let avg_length = index
                .field_stats(field)
                .map_or(0.0, |stats| stats.avg_length());
            targets.push(FieldTarget {
                field,
                boost: self.config.boost(field),
                avg_length,
                idf: terms.iter().fold(0.0, |acc, t| acc + t.idf),
                terms,
            });
        }

        targets
    }

    /// Score every document matching `clause`. A document's clause score is
    /// the sum of its field weights, added in field name order.
    fn clause_scores(&self, clause: &Clause) -> AHashMap<DocId, f32> {
        let index = self.index();
        let mut scores: AHashMap<DocId, f32> = AHashMap::new();

        for target in self.targets(clause) {
            let Some(first) = target.terms.first() else {
                continue;
            };
            for posting in index.postings(target.field, first.term) {
                let freq = self.frequency_in(&clause.kind, target.field, posting);
                if freq == 0 {
                    continue;
                }
                let weight = self.field_weight(&target, posting.doc_id, freq);
                *scores.entry(posting.doc_id).or_insert(0.0) += weight;
            }
        }

        scores
    }

    fn field_weight(&self, target: &FieldTarget<'_>, doc_id: DocId, freq: u32) -> f32 {
        let length = self.index().field_length(target.field, doc_id).unwrap_or(0);
        let tf_norm = self.scorer.tf_norm(freq, length, target.avg_length);
        self.scorer.weight(target.boost, target.idf, tf_norm)
    }

    /// Term frequency, or phrase frequency for phrases, given the posting of
    /// the clause's first term.
    fn frequency_in(&self, kind: &ClauseKind, field: &str, first: &Posting) -> u32 {
        match kind {
            ClauseKind::Term(_) => first.term_freq,
            ClauseKind::Phrase(terms) => self.phrase_freq(field, terms, first),
        }
    }

    /// Number of positions where all phrase terms occur consecutively.
    fn phrase_freq(&self, field: &str, terms: &[String], first: &Posting) -> u32 {
        let rest: Option<Vec<&Posting>> = terms
            .iter()
            .skip(1)
            .map(|term| self.index().posting_list(field, term)?.get(first.doc_id))
            .collect();
        let Some(rest) = rest else {
            return 0;
        };

        first
            .positions
            .iter()
            .filter(|&&start| {
                rest.iter().zip(1u32..).all(|(posting, offset)| {
                    posting.positions.binary_search(&(start + offset)).is_ok()
                })
            })
            .count() as u32
    }

    /// Frequency of `clause` in `doc_id` within `field`, 0 if absent.
    fn frequency(&self, clause: &Clause, field: &str, doc_id: DocId) -> u32 {
        let Some(first_term) = clause.kind.terms().first() else {
            return 0;
        };
        self.index()
            .posting_list(field, first_term)
            .and_then(|list| list.get(doc_id))
            .map_or(0, |posting| self.frequency_in(&clause.kind, field, posting))
    }

    /// Explain how `doc_id` scores for `query`, or `None` if it does not match.
    ///
    /// The explanation is rebuilt from the same inputs, in the same order, as
    /// the ranking score, so its clause values add up to the hit score exactly.
    pub fn explain(&self, query: &Query, doc_id: DocId) -> Option<Explanation> {
        let mut clauses = Vec::new();
        for clause in &query.clauses {
            match self.explain_clause(clause, doc_id) {
                Some(explanation) => clauses.push(explanation),
                None if query.operator == Operator::And => return None,
                None => {}
            }
        }
        if clauses.is_empty() {
            return None;
        }

        let score = clauses.iter().fold(0.0, |acc, c| acc + c.value);
        Some(Explanation::new(score, "sum of:").with_details(clauses))
    }

    fn explain_clause(&self, clause: &Clause, doc_id: DocId) -> Option<Explanation> {
        let mut fields = Vec::new();
        for target in self.targets(clause) {
            let freq = self.frequency(clause, target.field, doc_id);
            if freq == 0 {
                continue;
            }
            fields.push(self.explain_field(clause, &target, doc_id, freq));
        }
        if fields.is_empty() {
            return None;
        }

        let score = fields.iter().fold(0.0, |acc, f| acc + f.value);
        Some(Explanation::new(score, clause.description()).with_details(fields))
    }

    fn explain_field(
        &self,
        clause: &Clause,
        target: &FieldTarget<'_>,
        doc_id: DocId,
        freq: u32,
    ) -> Explanation {
        let length = self.index().field_length(target.field, doc_id).unwrap_or(0);
        let tf_norm = self.scorer.tf_norm(freq, length, target.avg_length);
        let weight = self.field_weight(target, doc_id, freq);
        let doc_count = self.scorer.doc_count();

        let term_idf = |t: &TermIdf<'_>| {
            Explanation::new(
                t.idf,
                format!(
                    "idf({}), computed as ln(1 + (N - n + 0.5) / (n + 0.5)) from:",
                    t.term
                ),
            )
            .with_details(vec![
                Explanation::new(t.doc_freq as f32, "n, number of documents containing term"),
                Explanation::new(doc_count as f32, "N, total number of documents"),
            ])
        };
        let idf = match target.terms.as_slice() {
            [single] => term_idf(single),
            terms => Explanation::new(target.idf, "idf, sum of:")
                .with_details(terms.iter().map(term_idf).collect()),
        };

        let freq_label = match clause.kind {
            ClauseKind::Term(_) => "freq, occurrences of term within field",
            ClauseKind::Phrase(_) => "phraseFreq, occurrences of phrase within field",
        };
        let tf = Explanation::new(
            tf_norm,
            "tf, computed as freq * (k1 + 1) / (freq + k1 * (1 - b + b * dl / avgdl)) from:",
        )
        .with_details(vec![
            Explanation::new(freq as f32, freq_label),
            Explanation::new(self.scorer.k1(), "k1, term saturation parameter"),
            Explanation::new(self.scorer.b(), "b, length normalization parameter"),
            Explanation::new(length as f32, "dl, length of field"),
            Explanation::new(target.avg_length, "avgdl, average length of field"),
        ]);

        let label = if clause.field.is_wildcard() {
            format!(
                "weight({clause} in {doc_id}) [field {}], product of:",
                target.field
            )
        } else {
            format!("weight({clause} in {doc_id}), product of:")
        };

        Explanation::new(weight, label).with_details(vec![
            Explanation::new(target.boost, "boost"),
            idf,
            tf,
        ])
    }
}
