//! Standard analyzer: NFKC normalization, lowercasing, and splitting on
//! every character that is not alphanumeric.

use unicode_normalization::UnicodeNormalization;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::Token;

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAnalyzer;

impl StandardAnalyzer {
    pub fn new() -> Self {
        StandardAnalyzer
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Vec<Token> {
        let normalized: String = text.nfkc().collect();
        let mut tokens = Vec::new();
        let mut current = String::new();

        for ch in normalized.chars() {
            if ch.is_alphanumeric() {
                current.push(ch);
            } else if !current.is_empty() {
                let position = tokens.len() as u32;
                tokens.push(Token::new(current.to_lowercase(), position));
                current.clear();
            }
        }
        if !current.is_empty() {
            let position = tokens.len() as u32;
            tokens.push(Token::new(current.to_lowercase(), position));
        }

        tokens
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
