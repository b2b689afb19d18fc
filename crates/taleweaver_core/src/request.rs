//! Request and response types for LLM generation.

use crate::{Message, Output, TokenUsageData};
use serde::{Deserialize, Serialize};

/// Provider-neutral generation request.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    derive_getters::Getters,
    derive_builder::Builder,
)]
pub struct GenerateRequest {
    /// Messages sent to the model, in order
    messages: Vec<Message>,
    /// Upper bound on generated tokens
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Model override; drivers fall back to their configured model
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// A request consisting of one user message.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_core::GenerateRequest;
    ///
    /// let request = GenerateRequest::prompt("Tell me a story");
    /// assert_eq!(request.messages().len(), 1);
    /// assert!(request.model().is_none());
    /// ```
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(text)],
            ..Self::default()
        }
    }

    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Provider-neutral generation response.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
pub struct GenerateResponse {
    /// Everything the model produced
    outputs: Vec<Output>,
    /// Token accounting, when the provider reports it
    #[builder(default)]
    usage: Option<TokenUsageData>,
}

impl GenerateResponse {
    /// A response with a single text output and no usage data.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            outputs: vec![Output::Text(text.into())],
            usage: None,
        }
    }

    /// Returns a builder for constructing a GenerateResponse.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }

    /// Joins every text output with newlines.
    pub fn joined_text(&self) -> String {
        self.outputs
            .iter()
            .map(|output| match output {
                Output::Text(text) => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
