//! HTTP answer service.
//!
//! Exposes the chat endpoint the conversation client talks to. Each request
//! is handled independently; the service holds no state across calls.

use crate::answer::{AnswerService, Turn};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::ProfChatError;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Shared application state.
struct AppState {
    service: AnswerService,
}

/// Run the HTTP answer service.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let service = AnswerService::from_settings(&settings)?;

    let state = Arc::new(AppState { service });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Profchat Answer Service");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Chat", "POST /api/chat");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Response Types ===

#[derive(Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Answer a conversation.
///
/// Body is the ordered turn list, oldest first, ending with the newest user
/// turn. Success returns `{"response": ...}`; an empty conversation is a 400,
/// any other failure is a 500. No partial results in either case.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(turns): Json<Vec<Turn>>,
) -> impl IntoResponse {
    match state.service.answer(&turns).await {
        Ok(response) => Json(ChatResponse { response }).into_response(),
        Err(e) => {
            error!("Chat request failed: {}", e);
            (
                error_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Map a pipeline failure to an HTTP status.
fn error_status(error: &ProfChatError) -> StatusCode {
    match error {
        ProfChatError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
