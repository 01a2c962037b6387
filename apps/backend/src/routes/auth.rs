//! Session middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Current user, stored in request extensions and passed explicitly to
/// every data-access and orchestrator call
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: Uuid,
    pub token: String,
}

/// Resolves `Authorization: Bearer <token>` into a [`Session`]
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?
        .trim()
        .to_string();

    let user = state
        .db
        .get_user_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid session token".to_string()))?;

    state.db.update_last_seen(user.id).await?;

    request.extensions_mut().insert(Session {
        user_id: user.id,
        token,
    });

    Ok(next.run(request).await)
}
