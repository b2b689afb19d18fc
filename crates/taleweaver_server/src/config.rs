//! Service configuration read from the environment.

use derive_getters::Getters;
use std::num::NonZeroUsize;
use std::time::Duration;
use taleweaver_error::ConfigError;
use taleweaver_models::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig};
use taleweaver_narrative::DEFAULT_MAX_SESSIONS;
use tracing::debug;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default CORS allow-list.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:3000"];

/// Configuration for the story service.
#[derive(Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ServerConfig {
    /// Completion backend credential
    api_key: String,
    /// Bind address
    #[builder(default = "\"0.0.0.0\".to_string()")]
    host: String,
    /// Listening port
    #[builder(default = "DEFAULT_PORT")]
    port: u16,
    /// Gemini model identifier
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// Gemini endpoint root
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Completion request timeout
    #[builder(default = "Duration::from_secs(120)")]
    timeout: Duration,
    /// Origins allowed by CORS; `*` allows any
    #[builder(default = "DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect()")]
    allowed_origins: Vec<String>,
    /// Session registry capacity
    #[builder(default = "NonZeroUsize::new(DEFAULT_MAX_SESSIONS).unwrap_or(NonZeroUsize::MIN)")]
    max_sessions: NonZeroUsize,
}

impl ServerConfig {
    /// Creates a builder for ServerConfig.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `GOOGLE_API_KEY`, falling back to `GEMINI_API_KEY` (required)
    /// - `HOST` (default: "0.0.0.0")
    /// - `PORT` (default: 8000)
    /// - `GEMINI_MODEL` (default: "gemini-1.5-flash")
    /// - `GEMINI_BASE_URL` (default: the public v1beta endpoint)
    /// - `GEMINI_TIMEOUT_SECS` (default: 120)
    /// - `STORY_ALLOWED_ORIGINS`, comma separated
    /// - `STORY_MAX_SESSIONS` (default: 1024)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = var("GOOGLE_API_KEY")
            .or_else(|| var("GEMINI_API_KEY"))
            .ok_or_else(|| {
                ConfigError::for_variable("GOOGLE_API_KEY", "not set (GEMINI_API_KEY is also accepted)")
            })?;

        let mut builder = Self::builder();
        builder.api_key(api_key);

        if let Some(host) = var("HOST") {
            builder.host(host);
        }
        if let Some(port) = var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| {
                    ConfigError::for_variable("PORT", format!("expected a port number, got '{}'", port))
                })?;
            builder.port(port);
        }
        if let Some(model) = var("GEMINI_MODEL") {
            builder.model(model);
        }
        if let Some(base_url) = var("GEMINI_BASE_URL") {
            builder.base_url(base_url);
        }
        if let Some(secs) = var("GEMINI_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ConfigError::for_variable(
                    "GEMINI_TIMEOUT_SECS",
                    format!("expected whole seconds, got '{}'", secs),
                )
            })?;
            builder.timeout(Duration::from_secs(secs));
        }
        if let Some(origins) = var("STORY_ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
            builder.allowed_origins(origins);
        }
        if let Some(max) = var("STORY_MAX_SESSIONS") {
            let max = max
                .parse::<usize>()
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or_else(|| {
                    ConfigError::for_variable(
                        "STORY_MAX_SESSIONS",
                        format!("expected a positive integer, got '{}'", max),
                    )
                })?;
            builder.max_sessions(max);
        }

        let config = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)))?;
        debug!(config = ?config, "Loaded configuration");
        Ok(config)
    }

    /// Connection settings for the Gemini driver.
    pub fn gemini_config(&self) -> Result<GeminiConfig, ConfigError> {
        GeminiConfig::builder()
            .api_key(self.api_key.clone())
            .model(self.model.clone())
            .base_url(self.base_url.clone())
            .timeout(self.timeout)
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid Gemini configuration: {}", e)))
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("allowed_origins", &self.allowed_origins)
            .field("max_sessions", &self.max_sessions)
            .finish()
    }
}
