//! Axum route handlers for the chat API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::advisor::models::PipelineResult;
use crate::errors::AppError;
use crate::models::conversation::ChatTurn;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct BeginRequest {
    /// Opening text; the configured seed conversation is used when absent.
    pub initial_text: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub conversation: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub turns: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub session_id: String,
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Starts a chat. Returns `conversation_started` or, for a confident opening,
/// `complete`. Restarting means calling this again without a `session_id`
/// (or with a fresh one); an id that already has history is a 400.
pub async fn handle_begin(
    State(state): State<AppState>,
    body: Option<Json<BeginRequest>>,
) -> Result<Json<PipelineResult>, AppError> {
    let Json(request) = body.unwrap_or_default();

    let initial_text = match request.initial_text {
        Some(text) if !text.trim().is_empty() => text,
        Some(_) => {
            return Err(AppError::Validation(
                "initial_text cannot be blank".to_string(),
            ))
        }
        None => state.seed_conversation.to_string(),
    };
    let session_id = request.session_id.filter(|id| !id.trim().is_empty());

    let result = state.advisor.begin(&initial_text, session_id).await?;
    Ok(Json(result))
}

/// POST /api/v1/sessions/:id/messages
pub async fn handle_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<PipelineResult>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let result = state
        .advisor
        .continue_conversation(&session_id, &request.message)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/sessions/:id/finalize
pub async fn handle_finalize(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<PipelineResult>, AppError> {
    Ok(Json(state.advisor.finalize(&session_id).await?))
}

/// GET /api/v1/sessions/:id/history
pub async fn handle_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let turns = state.advisor.history(&session_id).await?;
    Ok(Json(HistoryResponse { session_id, turns }))
}

/// GET /api/v1/sessions/:id/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = state.advisor.summarize(&session_id).await?;
    Ok(Json(SummaryResponse {
        session_id,
        summary,
    }))
}

/// POST /api/v1/recommendations
///
/// Single-shot pipeline over a complete conversation.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<PipelineResult>, AppError> {
    if request.conversation.trim().is_empty() {
        return Err(AppError::Validation(
            "conversation cannot be empty".to_string(),
        ));
    }
    Ok(Json(state.advisor.recommend_once(&request.conversation).await?))
}
