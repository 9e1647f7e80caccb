#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    dead_code,
    missing_docs,
    clippy::expect_used
)]
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::{Bytes, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use tokio::net::TcpListener;
use tracing::info;

/// Canned answer of the mock server.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(StatusCode::OK, body)
    }

    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as received by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("JSON request body")
    }
}

#[derive(Debug)]
struct MockState {
    response: MockResponse,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// An HTTP server on a random local port, recording every request and
/// answering them all with the same [`MockResponse`].
#[derive(Debug, Clone)]
pub struct MockServer {
    base_url: String,
    state: Arc<MockState>,
}

impl MockServer {
    pub async fn start(response: MockResponse) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            response,
            requests: Mutex::default(),
        });
        let app = Router::new()
            .fallback(record)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let local_addr = listener.local_addr()?;
        info!(%local_addr, "launching mock server");
        tokio::spawn(async move { axum::serve(listener, app).await });

        Ok(Self {
            base_url: format!("http://{local_addr}/api.php"),
            state,
        })
    }

    /// The API base URL, `http://127.0.0.1:{port}/api.php`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("lock requests").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("at least one request")
    }
}

async fn record(State(state): State<Arc<MockState>>, request: Request) -> impl IntoResponse {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.expect("readable body");
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(ToString::to_string)
        .unwrap_or_default();

    state
        .requests
        .lock()
        .expect("lock requests")
        .push(RecordedRequest {
            method: parts.method,
            path_and_query,
            headers: parts.headers,
            body,
        });

    let MockResponse {
        status,
        body,
        delay,
    } = state.response.clone();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    (status, [(CONTENT_TYPE, "application/json")], body)
}
