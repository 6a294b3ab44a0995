use axum::{
    extract::State,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{aggregate_days, CalendarMonth, DateRange};
use crate::errors::AppError;
use crate::extract::{AppPath, AppQuery};
use crate::models::entry::DayMood;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MonthResponse {
    pub month: CalendarMonth,
    pub range: DateRange,
    pub previous: CalendarMonth,
    pub next: CalendarMonth,
    pub days: Vec<DayMood>,
}

/// GET /api/v1/calendar/:year/:month?user_id=..
///
/// `month` is 1–12. Includes the neighbouring months for navigation.
pub async fn handle_get_month(
    State(state): State<AppState>,
    AppPath((year, month)): AppPath<(i32, u32)>,
    AppQuery(params): AppQuery<UserIdQuery>,
) -> Result<Json<MonthResponse>, AppError> {
    let calendar_month = CalendarMonth::new(year, month)
        .ok_or_else(|| AppError::Validation(format!("{year}-{month} is not a valid month")))?;
    let range = calendar_month
        .range()
        .ok_or_else(|| AppError::Validation(format!("{year}-{month} is out of range")))?;

    let entries = state.entries.list_range(params.user_id, range).await?;

    Ok(Json(MonthResponse {
        month: calendar_month,
        range,
        previous: calendar_month.previous(),
        next: calendar_month.next(),
        days: aggregate_days(entries),
    }))
}
