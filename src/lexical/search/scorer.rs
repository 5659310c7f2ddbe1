//! BM25 relevance scoring.

use crate::engine::config::Bm25Config;

/// BM25 scorer bound to the document count of one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BM25Scorer {
    k1: f32,
    b: f32,
    doc_count: usize,
}

impl BM25Scorer {
    pub fn new(config: Bm25Config, doc_count: usize) -> Self {
        Self {
            k1: config.k1,
            b: config.b,
            doc_count,
        }
    }

    pub fn k1(&self) -> f32 {
        self.k1
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    /// Inverse document frequency: `ln(1 + (N - n + 0.5) / (n + 0.5))`.
    ///
    /// Always positive, and strictly decreasing in `doc_freq`.
    pub fn idf(&self, doc_freq: usize) -> f32 {
        let n = self.doc_count as f32;
        let df = doc_freq as f32;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Saturated term frequency:
    /// `freq * (k1 + 1) / (freq + k1 * (1 - b + b * dl / avgdl))`.
    pub fn tf_norm(&self, freq: u32, field_length: u32, avg_length: f32) -> f32 {
        let tf = freq as f32;
        let length_norm = if avg_length > 0.0 {
            1.0 - self.b + self.b * field_length as f32 / avg_length
        } else {
            1.0
        };
        tf * (self.k1 + 1.0) / (tf + self.k1 * length_norm)
    }

    pub fn weight(&self, boost: f32, idf: f32, tf_norm: f32) -> f32 {
        boost * idf * tf_norm
    }
}
