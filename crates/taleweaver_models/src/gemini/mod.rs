//! Google Gemini provider.
//!
//! Talks to the REST `generateContent` endpoint directly over reqwest.

mod client;
mod conversions;
mod dto;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiConfig, GeminiConfigBuilder};
pub use conversions::{from_gemini_response, to_gemini_request};
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiErrorBody, GeminiErrorDetail, GeminiGenerationConfig,
    GeminiPart, GeminiPromptFeedback, GeminiRequest, GeminiRequestBuilder, GeminiResponse,
    GeminiUsageMetadata,
};
