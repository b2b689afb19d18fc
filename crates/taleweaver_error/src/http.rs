//! HTTP error types.

/// HTTP server error with source location.
///
/// Raised by the serving layer for problems that never reach the story
/// operations, such as an unusable session header or a failed bind.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// HTTP status code to report to the caller
    pub status_code: u16,
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given status and message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_error::HttpError;
    ///
    /// let err = HttpError::new(400, "Invalid session id");
    /// assert_eq!(err.status_code, 400);
    /// assert!(err.message.contains("session"));
    /// ```
    #[track_caller]
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status_code,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HTTP Error ({}): {} at line {} in {}",
            self.status_code, self.message, self.line, self.file
        )
    }
}

impl std::error::Error for HttpError {}
