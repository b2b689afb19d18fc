//! Gemini-specific error types.

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeminiErrorKind {
    /// API key was empty when the client was built
    MissingApiKey,
    /// Failed to create the underlying HTTP client
    ClientCreation(String),
    /// Request never produced an HTTP response (DNS, connect, timeout)
    Transport(String),
    /// Backend rejected the credential (401/403)
    Authentication {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Any other non-success HTTP status
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Response body could not be decoded
    ResponseParsing(String),
    /// Prompt was refused by the backend's safety filter
    Blocked(String),
    /// Response decoded but carried no text
    EmptyResponse,
}

impl std::fmt::Display for GeminiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeminiErrorKind::MissingApiKey => write!(f, "Gemini API key is empty"),
            GeminiErrorKind::ClientCreation(msg) => {
                write!(f, "Failed to create Gemini client: {}", msg)
            }
            GeminiErrorKind::Transport(msg) => write!(f, "Gemini request failed: {}", msg),
            GeminiErrorKind::Authentication {
                status_code,
                message,
            } => write!(
                f,
                "Gemini rejected the API key (HTTP {}): {}",
                status_code, message
            ),
            GeminiErrorKind::Api {
                status_code,
                message,
            } => write!(f, "HTTP {} error: {}", status_code, message),
            GeminiErrorKind::ResponseParsing(msg) => {
                write!(f, "Failed to parse Gemini response: {}", msg)
            }
            GeminiErrorKind::Blocked(reason) => write!(f, "Prompt blocked: {}", reason),
            GeminiErrorKind::EmptyResponse => write!(f, "Gemini returned no text"),
        }
    }
}

impl GeminiErrorKind {
    /// Whether the failure stems from the credential rather than the request.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            GeminiErrorKind::MissingApiKey | GeminiErrorKind::Authentication { .. }
        )
    }

    /// Failure class safe to show to API callers.
    ///
    /// Carries no backend message, status text or credential detail.
    ///
    /// ```
    /// use taleweaver_error::GeminiErrorKind;
    ///
    /// let kind = GeminiErrorKind::Authentication {
    ///     status_code: 403,
    ///     message: "API key not valid.".to_string(),
    /// };
    /// assert_eq!(kind.summary(), "completion backend rejected the credentials");
    /// ```
    pub fn summary(&self) -> &'static str {
        if self.is_authentication() {
            return "completion backend rejected the credentials";
        }
        match self {
            GeminiErrorKind::ClientCreation(_) | GeminiErrorKind::Transport(_) => {
                "completion backend unreachable"
            }
            GeminiErrorKind::ResponseParsing(_) => "completion backend response was unreadable",
            GeminiErrorKind::Blocked(_) => "prompt was blocked by the completion backend",
            GeminiErrorKind::EmptyResponse => "completion backend returned no text",
            _ => "completion backend returned an error",
        }
    }
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::EmptyResponse);
/// assert!(format!("{}", err).contains("no text"));
/// ```
#[derive(Debug, Clone)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for GeminiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Gemini Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for GeminiError {}
