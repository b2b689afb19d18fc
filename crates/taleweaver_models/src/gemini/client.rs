//! HTTP client for the Gemini `generateContent` endpoint.

use crate::gemini::{GeminiErrorBody, GeminiResponse, from_gemini_response, to_gemini_request};
use async_trait::async_trait;
use derive_getters::Getters;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use taleweaver_core::{GenerateRequest, GenerateResponse};
use taleweaver_error::{GeminiError, GeminiErrorKind, TaleweaverResult};
use taleweaver_interface::TaleweaverDriver;
use tracing::{debug, error, instrument};

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default REST endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini connection settings.
#[derive(Clone, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GeminiConfig {
    /// API key sent in the `x-goog-api-key` header
    api_key: String,
    /// Model identifier
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// Endpoint root, without a trailing slash
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Per-request timeout
    #[builder(default = "Duration::from_secs(120)")]
    timeout: Duration,
}

impl GeminiConfig {
    /// Creates a builder for GeminiConfig.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Gemini text-completion driver.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    ///
    /// # Errors
    ///
    /// Fails when the API key is blank or the HTTP client cannot be built.
    #[instrument(skip(config), fields(model = %config.model()))]
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        if config.api_key().trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey));
        }

        let client = Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        debug!(
            model = %config.model(),
            url = %config.base_url(),
            "Created Gemini client"
        );

        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url().trim_end_matches('/'),
            model
        )
    }

    /// Sends a request and returns the decoded response.
    #[instrument(skip(self, req), fields(model))]
    async fn call(&self, req: &GenerateRequest) -> Result<GenerateResponse, GeminiError> {
        let model = req.model().as_deref().unwrap_or(self.config.model().as_str());
        tracing::Span::current().record("model", model);

        let body = to_gemini_request(req)?;
        debug!(turns = body.contents().len(), "Sending request");

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                GeminiError::new(GeminiErrorKind::Transport(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorBody>(&raw)
                .map(|body| body.error.message)
                .unwrap_or(raw);
            error!(status = %status, error = %message, "API error");

            let kind = if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                GeminiErrorKind::Authentication {
                    status_code: status.as_u16(),
                    message,
                }
            } else {
                GeminiErrorKind::Api {
                    status_code: status.as_u16(),
                    message,
                }
            };
            return Err(GeminiError::new(kind));
        }

        let decoded: GeminiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            GeminiError::new(GeminiErrorKind::ResponseParsing(e.to_string()))
        })?;

        debug!(candidates = decoded.candidates.len(), "Received response");
        from_gemini_response(&decoded)
    }
}

#[async_trait]
impl TaleweaverDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> TaleweaverResult<GenerateResponse> {
        Ok(self.call(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
