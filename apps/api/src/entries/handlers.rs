use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::calendar::{aggregate_days, DateRange};
use crate::entries::validation::CreateEntryRequest;
use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::models::entry::{DayMood, MoodEntry};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EntryRangeQuery {
    pub user_id: Uuid,
    pub start: String,
    pub end: String,
}

/// POST /api/v1/entries
///
/// Saves a finished entry. The energy level is derived server-side from
/// `energy`; callers cannot set it.
pub async fn handle_create_entry(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateEntryRequest>,
) -> Result<(StatusCode, Json<MoodEntry>), AppError> {
    let (user_id, entry) = request.into_new_entry()?;
    let saved = state.entries.insert(user_id, entry).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/entries?user_id=..&start=YYYY-MM-DD&end=YYYY-MM-DD
///
/// Returns one `DayMood` per day in the inclusive range that has entries.
pub async fn handle_list_entries(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EntryRangeQuery>,
) -> Result<Json<Vec<DayMood>>, AppError> {
    let range = DateRange::parse(&params.start, &params.end)?;
    let entries = state.entries.list_range(params.user_id, range).await?;
    Ok(Json(aggregate_days(entries)))
}
