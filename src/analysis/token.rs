use serde::{Deserialize, Serialize};

/// A normalized term together with its position in the analyzed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The normalized term text.
    pub text: String,
    /// Zero-based position of the token within the analyzed value.
    pub position: u32,
}

impl Token {
    pub fn new(text: impl Into<String>, position: u32) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }
}
