//! Dashboard endpoint

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::db::date_utils::start_of_local_day;
use crate::error::Result;
use crate::models::DashboardStats;
use crate::routes::auth::Session;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    /// Client's offset from UTC in minutes (UTC-5 is -300)
    pub tz_offset_minutes: Option<i32>,
}

/// GET /api/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(params): Query<StatsParams>,
) -> Result<Json<DashboardStats>> {
    let since = start_of_local_day(params.tz_offset_minutes);
    let stats = state.db.dashboard_stats(session.user_id, since).await?;
    Ok(Json(stats))
}
