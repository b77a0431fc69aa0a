//! HTTP surface. Four routes on two paths:
//!
//! - `POST /api/chat` opens an upstream streaming completion and forwards the
//!   event-stream body verbatim, chunk by chunk, no re-framing.
//! - `GET /api/chat` is the liveness/config probe.
//! - `POST /api/assistant` runs the full classify/execute/synthesize turn.
//! - `POST /api/feedback` records a thumbs verdict and reports accuracy.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use compass_assistant::backend::BackendError;
use compass_assistant::engine::AssistantEngine;
use compass_assistant::learning::FeedbackEntry;
use compass_assistant::types::{Feedback, Message, Role, ToolCall, ToolDescriptor};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AssistantEngine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub tools_catalog: Vec<ToolDescriptor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub query: String,
    pub response: String,
    pub feedback: Feedback,
    #[serde(default)]
    pub tool_used: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_proxy).get(chat_probe))
        .route("/api/assistant", post(assistant_turn))
        .route("/api/feedback", post(record_feedback))
        .with_state(state)
        .layer(cors)
}

/// Forward the upstream event stream verbatim. Chunks pass through in
/// arrival order; the client does its own delta parsing.
async fn chat_proxy(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    match state.engine.backend().open_stream(&request.messages).await {
        Ok(upstream) => {
            let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
            let headers = response.headers_mut();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/event-stream"),
            );
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
            response
        }
        Err(e) => {
            tracing::warn!(error = %e, "Upstream stream failed to open");
            error_response(e)
        }
    }
}

fn error_response(e: BackendError) -> Response {
    let status = match &e {
        BackendError::MissingKey => StatusCode::BAD_REQUEST,
        BackendError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

async fn chat_probe(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "ok": true,
        "hasKey": state.engine.backend().has_key(),
    }))
}

/// Full pipeline for one turn. The last user message is the query; everything
/// before it is history.
async fn assistant_turn(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let Some(position) = request
        .messages
        .iter()
        .rposition(|m| m.role == Role::User)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "no user message in request" })),
        )
            .into_response();
    };

    let query = request.messages[position].content.clone();
    let history = &request.messages[..position];
    let outcome = state
        .engine
        .process_turn(&query, history, &request.tools_catalog)
        .await;

    Json(AssistantResponse {
        reply: outcome.reply,
        tool_call: outcome.tool_call,
    })
    .into_response()
}

async fn record_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Response {
    let mut entry = FeedbackEntry::new(request.query, request.response, request.feedback);
    entry.tool_used = request.tool_used;
    entry.reason = request.reason;
    entry.user_id = request.user_id;
    if request.message_id.is_some() {
        entry.message_id = request.message_id;
    }

    match state.engine.record_feedback(entry) {
        Ok(accuracy) => Json(json!({ "ok": true, "accuracy": accuracy })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to record feedback");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::CatalogExecutor;
    use compass_assistant::config::{
        AssistantConfig, BackendConfig, ServerConfig, TranslationConfig,
    };
    use compass_assistant::store::MemoryStore;

    fn offline_state() -> AppState {
        let config = AssistantConfig {
            storage_dir: std::env::temp_dir(),
            backend: BackendConfig {
                endpoint: "http://127.0.0.1:9/v1/chat/completions".into(),
                model: "test-model".into(),
                api_key: None,
                fallback_timeout_secs: 1,
                translate_timeout_secs: 1,
            },
            translation: TranslationConfig {
                endpoint: "http://127.0.0.1:9/v2/translate".into(),
                api_key: None,
                api_timeout_secs: 1,
            },
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            random_seed: Some(3),
        };
        let engine = AssistantEngine::new(
            &config,
            Arc::new(MemoryStore::default()),
            Arc::new(CatalogExecutor),
        )
        .unwrap();
        AppState {
            engine: Arc::new(engine),
        }
    }

    async fn spawn_server() -> String {
        let app = router(offline_state());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn probe_reports_missing_key() {
        let base = spawn_server().await;
        let body: serde_json::Value = reqwest::get(format!("{base}/api/chat"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["ok"], true);
        assert_eq!(body["hasKey"], false);
    }

    #[tokio::test]
    async fn chat_proxy_without_key_returns_json_error() {
        let base = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/chat"))
            .json(&json!({ "messages": [{ "role": "user", "content": "hi" }] }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("key"));
    }

    #[tokio::test]
    async fn assistant_route_runs_the_pipeline() {
        let base = spawn_server().await;
        let body: serde_json::Value = reqwest::Client::new()
            .post(format!("{base}/api/assistant"))
            .json(&json!({
                "messages": [{ "role": "user", "content": "hello" }],
                "toolsCatalog": [],
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(body["reply"]
            .as_str()
            .unwrap()
            .contains("AI Compass Assistant"));
        assert!(body.get("toolCall").is_none());
    }

    #[tokio::test]
    async fn feedback_route_reports_accuracy() {
        let base = spawn_server().await;
        let body: serde_json::Value = reqwest::Client::new()
            .post(format!("{base}/api/feedback"))
            .json(&json!({
                "query": "compare Concierge vs ChatGPT",
                "response": "a comparison",
                "feedback": "positive",
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["ok"], true);
        assert_eq!(body["accuracy"], 1.0);
    }
}
