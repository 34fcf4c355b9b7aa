use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use homework_bot::config::Config;
use homework_bot::services::practicum::{ApiError, StatusSource};
use homework_bot::services::telegram::{Notifier, SendError};

pub const PRACTICUM_TOKEN: &str = "practicum-test-token";
pub const TELEGRAM_TOKEN: &str = "123456:telegram-test-token";
pub const CHAT_ID: &str = "987654";

/// Serve `app` on an ephemeral localhost port and return its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{}", addr)
}

/// Base URL that refuses connections
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub fn test_config(practicum_endpoint: &str, telegram_api_url: &str) -> Config {
    Config {
        practicum_token: PRACTICUM_TOKEN.to_string(),
        telegram_token: TELEGRAM_TOKEN.to_string(),
        telegram_chat_id: CHAT_ID.to_string(),
        practicum_endpoint: practicum_endpoint.to_string(),
        telegram_api_url: telegram_api_url.to_string(),
        retry_time: Duration::from_millis(20),
        request_timeout: Duration::from_secs(5),
    }
}

// =============================================================================
// FAKE PRACTICUM API
// =============================================================================

#[derive(Debug, Clone)]
pub struct RecordedStatusRequest {
    pub authorization: Option<String>,
    pub from_date: Option<String>,
}

#[derive(Default)]
pub struct FakePracticum {
    replies: Mutex<VecDeque<(u16, String)>>,
    pub requests: Mutex<Vec<RecordedStatusRequest>>,
    pub delay: Mutex<Option<Duration>>,
}

#[allow(dead_code)]
impl FakePracticum {
    pub fn with_replies(replies: Vec<(u16, String)>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Mount at `/api/user_api/homework_statuses/` and return the full endpoint
    pub async fn start(self: &Arc<Self>) -> String {
        let app = Router::new()
            .route("/api/user_api/homework_statuses/", get(practicum_handler))
            .with_state(self.clone());
        let base = spawn_server(app).await;
        format!("{}/api/user_api/homework_statuses/", base)
    }
}

async fn practicum_handler(
    State(fake): State<Arc<FakePracticum>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    fake.requests.lock().unwrap().push(RecordedStatusRequest {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        from_date: query.get("from_date").cloned(),
    });

    let delay = *fake.delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let (status, body) = fake
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((200, r#"{"homeworks":[],"current_date":0}"#.to_string()));

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body,
    )
}

// =============================================================================
// FAKE TELEGRAM BOT API
// =============================================================================

#[derive(Default)]
pub struct FakeTelegram {
    replies: Mutex<VecDeque<(u16, String)>>,
    pub messages: Mutex<Vec<Value>>,
}

#[allow(dead_code)]
impl FakeTelegram {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_replies(replies: Vec<(u16, String)>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        })
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| m["text"].as_str().map(str::to_string))
            .collect()
    }

    pub async fn start(self: &Arc<Self>) -> String {
        let app = Router::new()
            .route(
                &format!("/bot{}/sendMessage", TELEGRAM_TOKEN),
                post(telegram_handler),
            )
            .with_state(self.clone());
        spawn_server(app).await
    }
}

async fn telegram_handler(
    State(fake): State<Arc<FakeTelegram>>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    fake.messages.lock().unwrap().push(body);

    let (status, reply) = fake
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((200, r#"{"ok":true,"result":{"message_id":1}}"#.to_string()));

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        reply,
    )
}

// =============================================================================
// IN-PROCESS FAKES
// =============================================================================

/// Status source answering from a fixed script, then with empty payloads
pub struct ScriptedSource {
    replies: Mutex<VecDeque<Result<Value, ApiError>>>,
    pub calls: Mutex<Vec<i64>>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(replies: Vec<Result<Value, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch(&self, since_timestamp: i64) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(since_timestamp);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(serde_json::json!({"homeworks": [], "current_date": 0})))
    }
}

/// Notifier that records every message it accepts
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<String>>,
    pub attempts: Mutex<usize>,
    pub failing: Mutex<bool>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            failing: Mutex::new(true),
            ..Default::default()
        })
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempt_count(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str) -> Result<(), SendError> {
        *self.attempts.lock().unwrap() += 1;
        if *self.failing.lock().unwrap() {
            return Err(SendError::Transport("channel unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(message.to_string());
        Ok(())
    }
}
