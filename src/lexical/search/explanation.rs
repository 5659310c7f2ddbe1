use serde::{Deserialize, Serialize};

/// A node of a score explanation tree.
///
/// The root's `value` is a hit's score and its `details` are the matched
/// clauses, in query order, whose values add up to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub value: f32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Explanation>,
}

impl Explanation {
    pub fn new(value: f32, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<Explanation>) -> Self {
        self.details = details;
        self
    }

    /// Sum of the direct children's values, added in order.
    pub fn sum_of_details(&self) -> f32 {
        self.details.iter().fold(0.0, |acc, d| acc + d.value)
    }

    /// Render the tree as indented text, one node per line.
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        self.write_indented(&mut out, 0);
        out
    }

    fn write_indented(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{} = {}\n", self.value, self.description));
        for detail in &self.details {
            detail.write_indented(out, depth + 1);
        }
    }
}
