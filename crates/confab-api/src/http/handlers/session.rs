//! Session lifecycle HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/chat/session/new          - Create a server-generated session
//! - GET    /api/chat/session/{id}/history - Full message history
//! - DELETE /api/chat/session/{id}         - Delete a session and its data

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use confab_types::chat::Message;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct SessionHistory {
    pub session_id: String,
    pub messages: Vec<Message>,
    pub total_messages: usize,
}

/// POST /api/chat/session/new - Create a session with a fresh id.
pub async fn new_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionCreated>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = state.chat.new_session().await?;

    let data = SessionCreated {
        session_id,
        status: "created",
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(data, request_id, elapsed)))
}

/// GET /api/chat/session/{id}/history - All messages, in order.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionHistory>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let messages = state.chat.history(&session_id).await?;

    let data = SessionHistory {
        total_messages: messages.len(),
        session_id,
        messages,
    };
    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(data, request_id, elapsed)))
}

/// DELETE /api/chat/session/{id} - Remove session, messages, and context.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let existed = state.chat.delete_session(&session_id).await?;
    if !existed {
        return Err(AppError::Store(confab_types::error::StoreError::NotFound));
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"deleted": true, "session_id": session_id}),
        request_id,
        elapsed,
    )))
}
