//! LLM provider integrations for Taleweaver.
//!
//! Each provider implements [`taleweaver_interface::TaleweaverDriver`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiCandidate, GeminiClient, GeminiConfig, GeminiConfigBuilder, GeminiContent,
    GeminiErrorBody, GeminiErrorDetail, GeminiGenerationConfig, GeminiPart, GeminiPromptFeedback,
    GeminiRequest, GeminiRequestBuilder, GeminiResponse, GeminiUsageMetadata,
    from_gemini_response, to_gemini_request,
};
