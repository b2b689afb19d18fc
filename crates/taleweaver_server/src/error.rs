//! Mapping of service errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use taleweaver_error::{HttpError, SessionError, TaleweaverError, TaleweaverErrorKind};
use tracing::{error, warn};

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What went wrong
    pub error: String,
}

/// A request failure on its way back to the caller.
#[derive(Debug)]
pub struct ApiError(TaleweaverError);

impl ApiError {
    /// The wrapped error.
    pub fn inner(&self) -> &TaleweaverError {
        &self.0
    }

    /// Status code and caller-facing message.
    ///
    /// Messages never include the source location recorded in the error or
    /// the backend's own error text; both stay in the log.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self.0.kind() {
            TaleweaverErrorKind::Generation(e) => (
                StatusCode::BAD_GATEWAY,
                format!("Story generation failed: {}", e.message()),
            ),
            TaleweaverErrorKind::Gemini(e) => (
                StatusCode::BAD_GATEWAY,
                format!("Story generation failed: {}", e.kind.summary()),
            ),
            TaleweaverErrorKind::Session(e) => (StatusCode::BAD_REQUEST, e.message().to_string()),
            TaleweaverErrorKind::Http(e) => (
                StatusCode::from_u16(e.status_code).unwrap_or(StatusCode::BAD_REQUEST),
                e.message.clone(),
            ),
            TaleweaverErrorKind::Prompt(_) | TaleweaverErrorKind::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl From<TaleweaverError> for ApiError {
    fn from(err: TaleweaverError) -> Self {
        Self(err)
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(HttpError::new(rejection.status().as_u16(), rejection.body_text()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(status = %status, error = %self.0, "Request failed");
        } else {
            warn!(status = %status, error = %self.0, "Request rejected");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
