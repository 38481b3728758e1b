//! Diagnostics handler.
//!
//! GET /api/chat/stats - Snapshot counters for dashboards.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SystemStats {
    pub active_sessions: usize,
    pub system_status: &'static str,
    pub timestamp: String,
}

/// GET /api/chat/stats
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SystemStats>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let active_sessions = state.chat.session_count().await?;

    let data = SystemStats {
        active_sessions,
        system_status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(data, request_id, elapsed)))
}
