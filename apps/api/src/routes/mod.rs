pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advisor::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interactive chat
        .route("/api/v1/sessions", post(handlers::handle_begin))
        .route(
            "/api/v1/sessions/:id/messages",
            post(handlers::handle_message),
        )
        .route(
            "/api/v1/sessions/:id/finalize",
            post(handlers::handle_finalize),
        )
        .route("/api/v1/sessions/:id/history", get(handlers::handle_history))
        .route("/api/v1/sessions/:id/summary", get(handlers::handle_summary))
        // Single-shot
        .route("/api/v1/recommendations", post(handlers::handle_recommend))
        .with_state(state)
}
