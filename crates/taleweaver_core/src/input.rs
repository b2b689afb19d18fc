//! Input types for LLM requests.

use serde::{Deserialize, Serialize};

/// Content sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text, such as a fully formatted prompt.
    Text(String),
}

impl Input {
    /// Returns the text content.
    pub fn as_text(&self) -> &str {
        match self {
            Input::Text(text) => text,
        }
    }
}
