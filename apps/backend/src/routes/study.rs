//! Study endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::Session;
use crate::AppState;

const DEFAULT_QUICK_LIMIT: i64 = 10;
const MAX_QUICK_LIMIT: i64 = 100;

/// GET /api/decks/:deck_id/study
pub async fn cards(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<Vec<StudyCard>>> {
    if !state.db.deck_exists(deck_id, session.user_id).await? {
        return Err(ApiError::NotFound(format!("Deck {}", deck_id)));
    }

    let cards = state.db.list_study_cards(deck_id, session.user_id).await?;
    Ok(Json(cards))
}

/// POST /api/cards/:card_id/review
pub async fn review(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(card_id): Path<Uuid>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<Progress>> {
    let progress = state
        .db
        .review_card(card_id, session.user_id, payload.action, Utc::now())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Card {}", card_id)))?;

    tracing::debug!(%card_id, status = progress.status.as_str(), "card reviewed");
    Ok(Json(progress))
}

/// GET /api/study/quick
pub async fn quick(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(params): Query<QuickReviewParams>,
) -> Result<Json<Vec<QuickReviewCard>>> {
    let limit = params.limit.unwrap_or(DEFAULT_QUICK_LIMIT);
    if limit < 1 {
        return Err(ApiError::BadRequest("limit must be positive".to_string()));
    }

    let cards = state
        .db
        .quick_review_cards(session.user_id, limit.min(MAX_QUICK_LIMIT))
        .await?;
    Ok(Json(cards))
}
