//! Prompt formatting error types.

/// Error kinds for prompt formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PromptErrorKind {
    /// A placeholder named by the template has no value.
    #[display("Template '{template}' is missing variable '{variable}'")]
    MissingVariable {
        /// Template name
        template: String,
        /// Variable that was not supplied
        variable: String,
    },
    /// A `{` was never closed.
    #[display("Template '{template}' has an unterminated placeholder")]
    UnterminatedPlaceholder {
        /// Template name
        template: String,
    },
}

/// Prompt formatting error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{PromptError, PromptErrorKind};
///
/// let err = PromptError::new(PromptErrorKind::MissingVariable {
///     template: "continuation".to_string(),
///     variable: "story_so_far".to_string(),
/// });
/// assert!(format!("{}", err).contains("story_so_far"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Prompt Error: {} at line {} in {}", kind, line, file)]
pub struct PromptError {
    kind: PromptErrorKind,
    line: u32,
    file: &'static str,
}

impl PromptError {
    /// Create a new prompt error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PromptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PromptErrorKind {
        &self.kind
    }
}
