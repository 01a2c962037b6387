//! AI card generation endpoint

use axum::{extract::State, Extension, Json};
use cardify_core::validation::validate_generation;

use crate::error::Result;
use crate::models::{GenerateRequest, GenerateResponse};
use crate::routes::auth::Session;
use crate::services::generation::generate_cards;
use crate::AppState;

/// POST /api/generate
/// Returns drafts only; saving them is a separate deck creation call
pub async fn generate(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    validate_generation(&payload.topic, payload.count)?;

    let topic = payload.topic.trim();
    tracing::info!(user_id = %session.user_id, topic, count = payload.count, "generating cards");

    let cards = generate_cards(state.ai.as_deref(), topic, payload.count).await;
    Ok(Json(GenerateResponse { cards }))
}
