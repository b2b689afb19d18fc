//! Error types for the Taleweaver story service.
//!
//! Every error records the file and line where it was raised. Component
//! errors lift into [`TaleweaverError`] through `?`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod gemini;
mod generation;
mod http;
mod prompt;
mod session;

pub use config::ConfigError;
pub use gemini::{GeminiError, GeminiErrorKind};
pub use generation::GenerationError;
pub use http::HttpError;
pub use prompt::{PromptError, PromptErrorKind};
pub use session::SessionError;

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum TaleweaverErrorKind {
    /// Startup configuration error
    #[display("{_0}")]
    Config(ConfigError),
    /// HTTP serving error
    #[display("{_0}")]
    Http(HttpError),
    /// Gemini backend error
    #[display("{_0}")]
    Gemini(GeminiError),
    /// Prompt formatting error
    #[display("{_0}")]
    Prompt(PromptError),
    /// Story generation failed
    #[display("{_0}")]
    Generation(GenerationError),
    /// Unusable session identifier
    #[display("{_0}")]
    Session(SessionError),
}

/// Taleweaver error with kind discrimination.
#[derive(Debug)]
pub struct TaleweaverError(Box<TaleweaverErrorKind>);

impl TaleweaverError {
    /// Create a new error from a kind.
    pub fn new(kind: TaleweaverErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TaleweaverErrorKind {
        &self.0
    }
}

impl std::fmt::Display for TaleweaverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Taleweaver Error: {}", self.0)
    }
}

impl std::error::Error for TaleweaverError {}

impl<T> From<T> for TaleweaverError
where
    T: Into<TaleweaverErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Taleweaver operations.
pub type TaleweaverResult<T> = std::result::Result<T, TaleweaverError>;
