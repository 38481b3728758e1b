//! Axum router configuration with middleware.
//!
//! All chat routes are under `/api/chat/`.
//! Middleware: CORS (allow any, matching the original single-page-app
//! deployment), request tracing.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chat_routes = Router::new()
        .route("/session/new", post(handlers::session::new_session))
        .route("/message", post(handlers::message::post_message))
        .route(
            "/session/{id}/history",
            get(handlers::session::get_history),
        )
        .route("/session/{id}", delete(handlers::session::delete_session))
        .route("/stats", get(handlers::stats::get_stats));

    Router::new()
        .nest("/api/chat", chat_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
