use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;

use crate::ai::{Extract, TranscriptError, validate_transcript};
use crate::store::LocalStore;

pub const GENERATE_PATH: &str = "/api/generate-action-items";

pub struct AppState<E> {
    extractor: Arc<E>,
    /// Preferences are read from here on every request, so prompt edits apply
    /// without a restart.
    store: LocalStore,
}

impl<E> AppState<E> {
    pub fn new(extractor: E, store: LocalStore) -> Self {
        Self {
            extractor: Arc::new(extractor),
            store,
        }
    }
}

impl<E> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            store: self.store.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    action_items: Vec<String>,
}

#[derive(Serialize)]
struct ErrResponse {
    error: String,
}

#[derive(Serialize)]
struct HealthInfo {
    service: &'static str,
    version: &'static str,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn router<E: Extract>(state: AppState<E>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(GENERATE_PATH, post(generate_action_items::<E>))
        .with_state(state)
}

pub async fn serve<E: Extract>(
    addr: SocketAddr,
    extractor: E,
    store: LocalStore,
) -> std::io::Result<()> {
    let app = router(AppState::new(extractor, store));
    log::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

async fn health() -> impl IntoResponse {
    Json(HealthInfo {
        service: crate::config::APP_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn generate_action_items<E: Extract>(
    State(state): State<AppState<E>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let invalid = || error_response(StatusCode::BAD_REQUEST, TranscriptError::Missing.to_string());
    let transcript = match payload {
        Ok(Json(body)) => match body.get("transcript").and_then(Value::as_str) {
            Some(t) => t.to_string(),
            None => return invalid(),
        },
        Err(e) => {
            log::debug!("Rejected request body: {}", e);
            return invalid();
        }
    };

    if let Err(e) = validate_transcript(&transcript) {
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    let prefs = state.store.load_preferences();
    match state.extractor.extract(prefs.prompt(), &transcript).await {
        Ok(action_items) => {
            log::info!("Generated {} action items", action_items.len());
            Json(GenerateResponse { action_items }).into_response()
        }
        Err(e) => {
            log::error!("API Error: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate action items",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedExtractor;
    use crate::core::preferences::{DEFAULT_PROMPT, Preferences};
    use axum::body::to_bytes;
    use serde_json::json;
    use tempfile::TempDir;

    fn state(extractor: ScriptedExtractor) -> (TempDir, AppState<ScriptedExtractor>) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        (dir, AppState::new(extractor, store))
    }

    async fn call(state: &AppState<ScriptedExtractor>, body: Value) -> (StatusCode, Value) {
        let resp = generate_action_items(State(state.clone()), Ok(Json(body))).await;
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn extracts_items() {
        let reply = "```json\n\
                     [\"John will send the report by Friday\", \"Sarah will call the client\"]\n\
                     ```";
        let (_dir, state) = state(ScriptedExtractor::replying(reply));
        let body = json!({
            "transcript": "John will send the report by Friday. Sarah will call the client."
        });
        let (status, body) = call(&state, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["actionItems"],
            json!(["John will send the report by Friday", "Sarah will call the client"])
        );
        assert_eq!(state.extractor.call_count(), 1);
        assert_eq!(state.extractor.last_instructions().as_deref(), Some(DEFAULT_PROMPT));
    }

    #[tokio::test]
    async fn prompt_edits_apply_to_the_next_request() {
        let (_dir, state) = state(ScriptedExtractor::replying("[]"));
        let body = json!({ "transcript": "We agreed to ship the beta next week." });

        call(&state, body.clone()).await;
        assert_eq!(state.extractor.last_instructions().as_deref(), Some(DEFAULT_PROMPT));

        let prefs = Preferences {
            default_prompt: "List only decisions, as a JSON array.".into(),
            ..Preferences::default()
        };
        state.store.save_preferences(&prefs).unwrap();

        call(&state, body).await;
        assert_eq!(
            state.extractor.last_instructions().as_deref(),
            Some("List only decisions, as a JSON array.")
        );
    }

    #[tokio::test]
    async fn short_transcripts_never_reach_the_model() {
        let (_dir, state) = state(ScriptedExtractor::replying("[]"));
        for transcript in ["", "hi", "   nine char   ", "123456789"] {
            let (status, body) = call(&state, json!({ "transcript": transcript })).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", transcript);
            assert!(body["error"].is_string());
        }
        assert_eq!(state.extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_or_non_string_transcript_is_rejected() {
        let (_dir, state) = state(ScriptedExtractor::replying("[]"));
        let (status, body) = call(&state, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid transcript provided");

        let (status, _) = call(&state, json!({ "transcript": 42 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&state, json!({ "transcript": "short" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Transcript is too short to generate meaningful action items"
        );
        assert_eq!(state.extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_is_a_generic_500() {
        let (_dir, state) = state(ScriptedExtractor::failing());
        let body = json!({ "transcript": "We agreed to ship the beta next week." });
        let (status, body) = call(&state, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to generate action items");
    }

    #[tokio::test]
    async fn unparseable_reply_uses_line_fallback() {
        let reply = "- Draft the agenda\n- Invite legal";
        let (_dir, state) = state(ScriptedExtractor::replying(reply));
        let body = json!({ "transcript": "Someone should draft the agenda and invite legal." });
        let (status, body) = call(&state, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["actionItems"], json!(["Draft the agenda", "Invite legal"]));
    }

    #[tokio::test]
    async fn zero_items_is_success() {
        let (_dir, state) = state(ScriptedExtractor::replying("[]"));
        let body = json!({ "transcript": "Nothing actionable was discussed today." });
        let (status, body) = call(&state, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["actionItems"], json!([]));
    }
}
