//! HTTP story service for Taleweaver.
//!
//! Serves `POST /story/start` and `POST /story/continue` over a
//! [`StoryTeller`](taleweaver_narrative::StoryTeller), plus `GET /story` and
//! `GET /health`. Requests pick a session with the `x-session-id` header.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod error;
mod metrics;
mod shutdown;

pub use api::{
    AppState, MAX_BODY_BYTES, SESSION_HEADER, StoryJson, StoryRequest, StoryResponse,
    cors_layer, create_router, session_key,
};
pub use config::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_PORT, ServerConfig, ServerConfigBuilder};
pub use error::{ApiError, ErrorBody};
pub use metrics::{StoryMetrics, StoryOperation};
pub use shutdown::{shutdown_signal, signal_received};
