//! Message posting handler.
//!
//! POST /api/chat/message - Record a user message and return the reply.
//! Auto-creates unknown sessions; content length is validated here (the
//! core never sees out-of-bounds input).

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use confab_types::chat::ReplySource;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Inclusive content length bounds, in characters.
const MIN_CONTENT_CHARS: usize = 1;
const MAX_CONTENT_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub session_id: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatMessageData {
    pub message: String,
    pub session_id: String,
    pub timestamp: String,
    pub confidence: f64,
    pub suggestions: Vec<String>,
    pub source: ReplySource,
}

/// POST /api/chat/message
pub async fn post_message(
    State(state): State<AppState>,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ApiResponse<ChatMessageData>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if request.session_id.is_empty() {
        return Err(AppError::Validation("session_id must not be empty".to_string()));
    }
    let chars = request.content.chars().count();
    if !(MIN_CONTENT_CHARS..=MAX_CONTENT_CHARS).contains(&chars) {
        return Err(AppError::Validation(format!(
            "content must be {MIN_CONTENT_CHARS}-{MAX_CONTENT_CHARS} characters, got {chars}"
        )));
    }

    let reply = state
        .chat
        .post_message(&request.session_id, &request.content)
        .await;

    let data = ChatMessageData {
        message: reply.message,
        session_id: request.session_id,
        timestamp: chrono::Utc::now().to_rfc3339(),
        confidence: reply.confidence,
        suggestions: reply.suggestions,
        source: reply.source,
    };
    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(data, request_id, elapsed)))
}
