//! Session registration and status endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{RegisterRequest, RegisterResponse, SessionStatusResponse};
use crate::routes::auth::Session;
use crate::AppState;

/// POST /api/session/register
/// Creates a new user and returns its bearer token
pub async fn register(
    State(state): State<AppState>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<Json<RegisterResponse>> {
    let display_name = payload
        .and_then(|Json(p)| p.display_name)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let user = state.db.create_user(display_name.as_deref()).await?;

    tracing::info!("Registered new user: {}", user.id);

    Ok(Json(RegisterResponse {
        user_id: user.id,
        token: user.token,
    }))
}

/// GET /api/session/status
pub async fn status(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<SessionStatusResponse>> {
    let user = state
        .db
        .get_user_by_token(&session.token)
        .await?
        .filter(|u| u.id == session.user_id)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(SessionStatusResponse {
        user_id: user.id,
        display_name: user.display_name,
        last_seen_at: user.last_seen_at,
    }))
}
