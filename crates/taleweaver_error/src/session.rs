//! Session error types.

/// A caller-supplied session identifier was unusable.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", message, line, file)]
pub struct SessionError {
    message: String,
    line: u32,
    file: &'static str,
}

impl SessionError {
    /// Create a new session error at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Why the session id was rejected.
    pub fn message(&self) -> &str {
        &self.message
    }
}
