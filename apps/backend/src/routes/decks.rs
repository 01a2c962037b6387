//! Deck endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use cardify_core::validation::validate_new_deck;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::Session;
use crate::AppState;

/// GET /api/decks
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<DeckSummary>>> {
    let decks = state.db.list_decks(session.user_id).await?;
    Ok(Json(decks))
}

/// POST /api/decks
/// Validates before anything touches the database
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<DeckDetail>)> {
    validate_new_deck(&payload.title, &payload.cards)?;

    let deck_id = state.db.create_deck(session.user_id, &payload).await?;
    let deck = state
        .db
        .get_deck(deck_id, session.user_id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("Deck {} vanished after insert", deck_id)))?;

    Ok((StatusCode::CREATED, Json(deck)))
}

/// GET /api/decks/:deck_id
pub async fn get(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<DeckDetail>> {
    let deck = state
        .db
        .get_deck(deck_id, session.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {}", deck_id)))?;

    Ok(Json(deck))
}

/// DELETE /api/decks/:deck_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(deck_id): Path<Uuid>,
) -> Result<StatusCode> {
    if !state.db.delete_deck(deck_id, session.user_id).await? {
        return Err(ApiError::NotFound(format!("Deck {}", deck_id)));
    }

    tracing::info!(%deck_id, "deck deleted");
    Ok(StatusCode::NO_CONTENT)
}
