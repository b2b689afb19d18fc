//! Story generation error types.

/// The completion backend could not produce a usable segment.
///
/// Story operations raise this for every backend failure, whatever its
/// cause, and leave the narrative untouched.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Failed: {} at line {} in {}", message, line, file)]
pub struct GenerationError {
    message: String,
    line: u32,
    file: &'static str,
}

impl GenerationError {
    /// Create a new generation error at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_error::GenerationError;
    ///
    /// let err = GenerationError::new("backend returned no text");
    /// assert_eq!(err.message(), "backend returned no text");
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Reason reported by the backend or the story layer.
    pub fn message(&self) -> &str {
        &self.message
    }
}
