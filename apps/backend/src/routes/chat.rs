//! Tutor chat endpoint

use axum::{extract::State, Extension, Json};
use cardify_core::validation::validate_chat_message;

use crate::error::Result;
use crate::models::{ChatRequest, ChatResponse};
use crate::routes::auth::Session;
use crate::services::tutor;
use crate::AppState;

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    validate_chat_message(&payload.message)?;

    tracing::debug!(user_id = %session.user_id, "tutor chat");
    let reply = tutor::chat(
        state.ai.as_deref(),
        &payload.question,
        &payload.answer,
        &payload.message,
    )
    .await;

    Ok(Json(ChatResponse { reply }))
}
