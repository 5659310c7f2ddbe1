pub mod standard;
#[cfg(feature = "stemmers")]
pub mod stemming;

pub use standard::StandardAnalyzer;
#[cfg(feature = "stemmers")]
pub use stemming::StemmingAnalyzer;

use crate::analysis::token::Token;

/// Turns a field value or a query clause into normalized tokens.
///
/// Implementations must be pure: the same input always yields the same
/// tokens, independent of locale or time.
pub trait Analyzer: Send + Sync + std::fmt::Debug {
    /// Analyze `text` into a token stream.
    fn analyze(&self, text: &str) -> Vec<Token>;

    /// Name of this analyzer, used in logs and configuration dumps.
    fn name(&self) -> &'static str;

    /// Convenience: the token texts only, in order.
    fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).into_iter().map(|t| t.text).collect()
    }
}
