//! HTTP routes for the story service.

use crate::error::ApiError;
use crate::metrics::{StoryMetrics, StoryOperation};
use axum::{
    Json, Router,
    extract::{FromRequest, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use taleweaver_error::{ConfigError, SessionError, TaleweaverResult};
use taleweaver_interface::TaleweaverDriver;
use taleweaver_narrative::{SessionKey, StorySnapshot, StoryTeller};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::instrument;

/// Header naming the story session a request belongs to.
pub const SESSION_HEADER: &str = "x-session-id";

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Request body for start and continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    /// Reader's free-text input
    pub user_input: String,
}

/// Story returned by every story route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    /// Full accumulated story
    pub story_so_far: String,
    /// Segment produced by the latest operation
    pub ai_part: String,
}

impl From<StorySnapshot> for StoryResponse {
    fn from(snapshot: StorySnapshot) -> Self {
        let (story_so_far, ai_part) = snapshot.into_parts();
        Self {
            story_so_far,
            ai_part,
        }
    }
}

/// JSON body extractor that reports rejections as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct StoryJson<T>(pub T);

/// Shared router state.
pub struct AppState<D> {
    /// Story operations and their sessions
    pub teller: Arc<StoryTeller<D>>,
    /// Operation metrics
    pub metrics: StoryMetrics,
}

impl<D> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            teller: Arc::clone(&self.teller),
            metrics: self.metrics.clone(),
        }
    }
}

/// Creates the API router.
pub fn create_router<D>(teller: Arc<StoryTeller<D>>, cors: CorsLayer) -> Router
where
    D: TaleweaverDriver + 'static,
{
    let state = AppState {
        teller,
        metrics: StoryMetrics::new(),
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/story", get(get_story::<D>))
        .route("/story/start", post(start_story::<D>))
        .route("/story/continue", post(continue_story::<D>))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for the given allow-list. A `*` entry allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| {
                    ConfigError::for_variable(
                        "STORY_ALLOWED_ORIGINS",
                        format!("invalid origin '{}'", origin),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(SESSION_HEADER)]))
}

/// Session named by the request, or the default session.
pub fn session_key(headers: &HeaderMap) -> Result<SessionKey, SessionError> {
    match headers.get(SESSION_HEADER) {
        None => Ok(SessionKey::default()),
        Some(value) => {
            let raw = value
                .to_str()
                .map_err(|_| SessionError::new("Session id is not valid text"))?;
            SessionKey::parse(raw)
        }
    }
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Current story for the session.
#[instrument(skip_all)]
async fn get_story<D>(
    State(state): State<AppState<D>>,
    headers: HeaderMap,
) -> Result<Json<StoryResponse>, ApiError>
where
    D: TaleweaverDriver + 'static,
{
    let session = session_key(&headers)?;
    let snapshot = state.teller.snapshot(&session).await;
    Ok(Json(snapshot.into()))
}

/// Starts a new story.
#[instrument(skip_all)]
async fn start_story<D>(
    State(state): State<AppState<D>>,
    headers: HeaderMap,
    StoryJson(request): StoryJson<StoryRequest>,
) -> Result<Json<StoryResponse>, ApiError>
where
    D: TaleweaverDriver + 'static,
{
    let session = session_key(&headers)?;
    let started = Instant::now();
    let result = state.teller.start(&session, &request.user_input).await;
    respond(&state.metrics, StoryOperation::Start, started, result)
}

/// Continues the story.
#[instrument(skip_all)]
async fn continue_story<D>(
    State(state): State<AppState<D>>,
    headers: HeaderMap,
    StoryJson(request): StoryJson<StoryRequest>,
) -> Result<Json<StoryResponse>, ApiError>
where
    D: TaleweaverDriver + 'static,
{
    let session = session_key(&headers)?;
    let started = Instant::now();
    let result = state
        .teller
        .continue_story(&session, &request.user_input)
        .await;
    respond(&state.metrics, StoryOperation::Continue, started, result)
}

fn respond(
    metrics: &StoryMetrics,
    operation: StoryOperation,
    started: Instant,
    result: TaleweaverResult<StorySnapshot>,
) -> Result<Json<StoryResponse>, ApiError> {
    metrics.record(operation, result.is_ok(), started.elapsed());
    Ok(Json(result?.into()))
}
