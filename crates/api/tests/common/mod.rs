#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use finserv_api::config::ServerConfig;
use finserv_api::router::build_app_router;
use finserv_api::state::AppState;
use finserv_core::submission::NewSubmission;
use finserv_core::types::DbId;
use finserv_db::{StoreError, SubmissionStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        submission_timeout: Duration::from_secs(8),
        static_dir: PathBuf::from("frontend"),
    }
}

/// Build the full application router around `store`.
pub fn build_test_app(store: Arc<dyn SubmissionStore>) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Arc<dyn SubmissionStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// In-memory stores
// ---------------------------------------------------------------------------

/// Records every inserted submission, optionally after a delay.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<NewSubmission>>,
    delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(Vec::new()),
            delay: Some(delay),
        })
    }

    pub fn rows(&self) -> Vec<NewSubmission> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<DbId, StoreError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut rows = self.rows.lock().unwrap();
        rows.push(submission.clone());
        Ok(rows.len() as DbId)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Fails every call with the error produced by `make`.
pub struct FailingStore {
    make: fn() -> StoreError,
}

impl FailingStore {
    pub fn new(make: fn() -> StoreError) -> Arc<Self> {
        Arc::new(Self { make })
    }

    /// Behaves like a MySQL server that refuses connections.
    pub fn refused() -> Arc<Self> {
        Self::new(|| {
            StoreError::from(sqlx::Error::Io(std::io::Error::from(
                std::io::ErrorKind::ConnectionRefused,
            )))
        })
    }
}

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn insert(&self, _submission: &NewSubmission) -> Result<DbId, StoreError> {
        Err((self.make)())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err((self.make)())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Assert the `{ success, message }` envelope and status in one go.
pub async fn assert_envelope(response: Response, status: StatusCode, success: bool, message: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], success, "body: {json}");
    assert_eq!(json["message"], message, "body: {json}");
}
