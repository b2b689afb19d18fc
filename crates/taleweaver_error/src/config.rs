//! Startup configuration failures.

/// A setting was missing or unusable.
///
/// Names the environment variable at fault when there is one, so startup
/// logs point straight at the setting to fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Environment variable at fault, if any
    pub variable: Option<&'static str>,
    /// What is wrong with it
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// A failure not tied to one variable.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::located(None, message.into())
    }

    /// A failure caused by the environment variable `variable`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_error::ConfigError;
    ///
    /// let err = ConfigError::for_variable("PORT", "expected a port number, got 'eighty'");
    /// assert_eq!(err.variable, Some("PORT"));
    /// assert!(err.to_string().starts_with("Configuration Error: PORT: expected"));
    /// ```
    #[track_caller]
    pub fn for_variable(variable: &'static str, message: impl Into<String>) -> Self {
        Self::located(Some(variable), message.into())
    }

    #[track_caller]
    fn located(variable: Option<&'static str>, message: String) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            variable,
            message,
            line: caller.line(),
            file: caller.file(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Configuration Error: ")?;
        if let Some(variable) = self.variable {
            write!(f, "{}: ", variable)?;
        }
        write!(f, "{} at line {} in {}", self.message, self.line, self.file)
    }
}

impl std::error::Error for ConfigError {}
