use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use taleweaver_core::{GenerateRequest, GenerateResponse};
use taleweaver_error::{GeminiError, GeminiErrorKind, TaleweaverResult};
use taleweaver_interface::TaleweaverDriver;
use taleweaver_narrative::{StoryStore, StoryTeller};
use taleweaver_server::{MAX_BODY_BYTES, SESSION_HEADER, cors_layer, create_router};
use tower::ServiceExt;

/// Mock driver that replays scripted replies.
#[derive(Default)]
struct MockDriver {
    replies: Mutex<VecDeque<Result<String, GeminiErrorKind>>>,
    calls: Mutex<usize>,
}

impl MockDriver {
    fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<&'static str, GeminiErrorKind>>,
    {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|reply| reply.map(str::to_string))
                    .collect(),
            ),
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TaleweaverDriver for MockDriver {
    async fn generate(&self, _req: &GenerateRequest) -> TaleweaverResult<GenerateResponse> {
        *self.calls.lock().unwrap() += 1;
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted");
        match reply {
            Ok(text) => Ok(GenerateResponse::text(text)),
            Err(kind) => Err(GeminiError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-v1"
    }
}

fn app(driver: Arc<MockDriver>) -> Router {
    let teller = Arc::new(StoryTeller::new(driver, StoryStore::default()));
    let cors = cors_layer(&["http://localhost:5173".to_string()]).unwrap();
    create_router(teller, cors)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_in(session: &str, uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(SESSION_HEADER, session)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn unavailable() -> GeminiErrorKind {
    GeminiErrorKind::Api {
        status_code: 503,
        message: "overloaded".to_string(),
    }
}

#[tokio::test]
async fn test_lighthouse_story_over_http() {
    let driver = Arc::new(MockDriver::new([
        Ok("The keeper lit the lamp."),
        Ok("A ship emerged from the fog."),
    ]));
    let app = app(driver.clone());

    let (status, body) = send(
        &app,
        post("/story/start", json!({ "user_input": "a lonely lighthouse keeper" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "story_so_far": "The keeper lit the lamp.",
            "ai_part": "The keeper lit the lamp."
        })
    );

    let (status, body) = send(
        &app,
        post("/story/continue", json!({ "user_input": "a ship appears" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "story_so_far": "The keeper lit the lamp. A ship emerged from the fog.",
            "ai_part": "A ship emerged from the fog."
        })
    );
    assert_eq!(driver.calls(), 2);
}

#[tokio::test]
async fn test_backend_failure_returns_bad_gateway() {
    let driver = Arc::new(MockDriver::new([Ok("Opening."), Err(unavailable())]));
    let app = app(driver);

    send(&app, post("/story/start", json!({ "user_input": "x" }))).await;
    let (status, body) = send(&app, post("/story/continue", json!({ "user_input": "y" }))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Story generation failed"), "{}", message);
    assert_eq!(
        message,
        "Story generation failed: completion backend returned an error"
    );

    let (status, body) = send(&app, Request::get("/story").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["story_so_far"], "Opening.");
    assert_eq!(body["ai_part"], "Opening.");
}

#[tokio::test]
async fn test_rejected_credentials_are_not_echoed_to_callers() {
    let driver = Arc::new(MockDriver::new([Err(GeminiErrorKind::Authentication {
        status_code: 403,
        message: "API key not valid. Please pass a valid API key.".to_string(),
    })]));
    let app = app(driver);

    let (status, body) = send(&app, post("/story/start", json!({ "user_input": "x" }))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = body["error"].as_str().unwrap();
    assert_eq!(
        message,
        "Story generation failed: completion backend rejected the credentials"
    );
    assert!(!message.contains("API key"), "{}", message);
    assert!(!message.contains("403"), "{}", message);
}

#[tokio::test]
async fn test_invalid_session_header_is_rejected() {
    let driver = Arc::new(MockDriver::new([]));
    let app = app(driver.clone());

    let (status, body) = send(
        &app,
        post_in("has spaces", "/story/start", json!({ "user_input": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Session id"));
    assert_eq!(driver.calls(), 0);
}

#[tokio::test]
async fn test_sessions_are_isolated_by_header() {
    let driver = Arc::new(MockDriver::new([Ok("Alpha."), Ok("Beta."), Ok("Gamma.")]));
    let app = app(driver);

    send(&app, post_in("a", "/story/start", json!({ "user_input": "1" }))).await;
    send(&app, post_in("b", "/story/start", json!({ "user_input": "2" }))).await;
    let (_, body) = send(
        &app,
        post_in("a", "/story/continue", json!({ "user_input": "3" })),
    )
    .await;
    assert_eq!(body["story_so_far"], "Alpha. Gamma.");

    let (_, body) = send(
        &app,
        Request::get("/story")
            .header(SESSION_HEADER, "b")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(body["story_so_far"], "Beta.");

    let (_, body) = send(&app, Request::get("/story").body(Body::empty()).unwrap()).await;
    assert_eq!(body, json!({ "story_so_far": "", "ai_part": "" }));
}

#[tokio::test]
async fn test_health() {
    let app = app(Arc::new(MockDriver::new([])));
    let (status, body) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_malformed_json_is_rejected_with_error_body() {
    let driver = Arc::new(MockDriver::new([]));
    let app = app(driver.clone());

    let req = Request::post("/story/start")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, post("/story/start", json!({ "prompt": "x" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("user_input"));

    assert_eq!(driver.calls(), 0);
}

#[tokio::test]
async fn test_cors_allows_listed_origin_only() {
    let app = app(Arc::new(MockDriver::new([])));

    let response = app
        .clone()
        .oneshot(
            Request::get("/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );

    let response = app
        .oneshot(
            Request::get("/health")
                .header(header::ORIGIN, "http://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let driver = Arc::new(MockDriver::new([]));
    let app = app(driver.clone());

    let body = json!({ "user_input": "a".repeat(MAX_BODY_BYTES) }).to_string();
    let req = Request::post("/story/start")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(driver.calls(), 0);
}

#[test]
fn test_wildcard_and_invalid_origins() {
    assert!(cors_layer(&["*".to_string()]).is_ok());
    assert!(cors_layer(&["http://bad\norigin".to_string()]).is_err());
}
