#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use glean::config::RetryPolicy;
use glean::fetcher::{AttemptError, RetryObserver};

/// One scripted upstream reply. The last entry repeats once the script runs out.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(u16, Value),
    Raw(u16, &'static str),
    Hang(Duration, Value),
}

struct MockState {
    script: Vec<Reply>,
    hits: AtomicUsize,
    params: Mutex<Vec<HashMap<String, String>>>,
}

pub struct MockUpstream {
    pub url: String,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn received_params(&self) -> Vec<HashMap<String, String>> {
        self.state.params.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    state.params.lock().unwrap().push(params);

    let reply = state
        .script
        .get(hit)
        .or_else(|| state.script.last())
        .cloned()
        .unwrap_or(Reply::Json(200, Value::Object(Default::default())));

    match reply {
        Reply::Json(status, body) => json_response(status, body.to_string()),
        Reply::Raw(status, body) => json_response(status, body.to_string()),
        Reply::Hang(delay, body) => {
            tokio::time::sleep(delay).await;
            json_response(200, body.to_string())
        }
    }
}

fn json_response(status: u16, body: String) -> Response {
    let status = StatusCode::from_u16(status).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub async fn spawn_upstream(script: Vec<Reply>) -> MockUpstream {
    let state = Arc::new(MockState {
        script,
        hits: AtomicUsize::new(0),
        params: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/", get(handle))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        url: format!("http://{addr}/"),
        state,
    }
}

/// An address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        timeout: Duration::from_secs(5),
        backoff_base: Duration::from_millis(1),
        backoff_floor: Duration::ZERO,
    }
}

#[derive(Debug, Clone)]
pub struct FailedAttempt {
    pub attempt: u32,
    pub max_attempts: u32,
    pub cause: String,
    pub next_delay: Option<Duration>,
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<FailedAttempt>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<FailedAttempt> {
        self.events.lock().unwrap().clone()
    }
}

impl RetryObserver for RecordingObserver {
    fn on_attempt_failed(
        &self,
        attempt: u32,
        max_attempts: u32,
        cause: &AttemptError,
        next_delay: Option<Duration>,
    ) {
        self.events.lock().unwrap().push(FailedAttempt {
            attempt,
            max_attempts,
            cause: cause.to_string(),
            next_delay,
        });
    }
}
