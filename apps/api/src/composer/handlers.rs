use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::parse_iso_date;
use crate::composer::registry::{submit_analysis, SessionSlot};
use crate::composer::session::{ComposerSession, ComposerSnapshot};
use crate::entries::validation::validate_new_entry;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::entry::MoodEntry;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OpenSessionRequest {
    pub user_id: Uuid,
    /// Pre-fills the composer, e.g. when re-editing.
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct EnergyRequest {
    pub energy: f64,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SaveRequest {
    /// `YYYY-MM-DD`; today (UTC) when omitted.
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub state: ComposerSnapshot,
}

impl SessionResponse {
    fn new(slot: &SessionSlot, state: ComposerSnapshot) -> Self {
        Self {
            session_id: slot.id,
            user_id: slot.user_id,
            state,
        }
    }
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub entry: MoodEntry,
    pub session: SessionResponse,
}

/// POST /api/v1/sessions
pub async fn handle_open_session(
    State(state): State<AppState>,
    AppJson(req): AppJson<OpenSessionRequest>,
) -> (StatusCode, Json<SessionResponse>) {
    state.sessions.prune_idle().await;

    let session = match req.text {
        Some(text) => ComposerSession::with_text(text),
        None => ComposerSession::new(),
    };
    let slot = state.sessions.open(req.user_id, session).await;
    let snapshot = slot.lock().await.snapshot();
    (
        StatusCode::CREATED,
        Json(SessionResponse::new(&slot, snapshot)),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let slot = state.sessions.get(id).await?;
    let snapshot = slot.lock().await.snapshot();
    Ok(Json(SessionResponse::new(&slot, snapshot)))
}

/// PUT /api/v1/sessions/:id/text
pub async fn handle_update_text(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<TextRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let slot = state.sessions.get(id).await?;
    let snapshot = {
        let mut session = slot.lock().await;
        if !session.text_changed(req.text) {
            return Err(AppError::Validation(
                "Text can only change before analysis or after edit".to_string(),
            ));
        }
        session.snapshot()
    };
    Ok(Json(SessionResponse::new(&slot, snapshot)))
}

/// POST /api/v1/sessions/:id/submit
///
/// Waits for the analysis. Failures are reported through the session's
/// `error` state, not as an HTTP error. Blank text or a session that is not
/// `idle`/`error` leaves the state untouched.
pub async fn handle_submit(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let slot = state.sessions.get(id).await?;
    let snapshot = submit_analysis(Arc::clone(&slot), Arc::clone(&state.analyzer)).await;
    Ok(Json(SessionResponse::new(&slot, snapshot)))
}

/// POST /api/v1/sessions/:id/edit
pub async fn handle_edit(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let slot = state.sessions.get(id).await?;
    let snapshot = {
        let mut session = slot.lock().await;
        session.edit();
        session.snapshot()
    };
    Ok(Json(SessionResponse::new(&slot, snapshot)))
}

/// PUT /api/v1/sessions/:id/energy
pub async fn handle_adjust_energy(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<EnergyRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    if !req.energy.is_finite() {
        return Err(AppError::Validation("energy must be a number".to_string()));
    }
    let slot = state.sessions.get(id).await?;
    let snapshot = {
        let mut session = slot.lock().await;
        if session.adjust_energy(req.energy).is_none() {
            return Err(AppError::Validation(
                "Energy can only be adjusted after analysis completes".to_string(),
            ));
        }
        session.snapshot()
    };
    Ok(Json(SessionResponse::new(&slot, snapshot)))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let slot = state.sessions.get(id).await?;
    let snapshot = {
        let mut session = slot.lock().await;
        session.reset();
        session.snapshot()
    };
    Ok(Json(SessionResponse::new(&slot, snapshot)))
}

/// POST /api/v1/sessions/:id/save
///
/// Persists the finished entry with its final color, then resets the
/// session. If the store fails the session keeps its state so the user can
/// retry. A request without a JSON body saves under today's date; a JSON
/// body that does not parse is rejected.
pub async fn handle_save(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    body: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveResponse>), AppError> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => SaveRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let date = match req.date.as_deref() {
        Some(date) => parse_iso_date("date", date)?,
        None => Utc::now().date_naive(),
    };

    let slot = state.sessions.get(id).await?;
    let mut session = slot.lock().await;
    let draft = session.draft(date).ok_or_else(|| {
        AppError::Validation("Only an analyzed entry can be saved".to_string())
    })?;
    validate_new_entry(&draft)?;

    let entry = state.entries.insert(slot.user_id, draft).await?;
    session.reset();
    let snapshot = session.snapshot();
    drop(session);

    Ok((
        StatusCode::CREATED,
        Json(SaveResponse {
            entry,
            session: SessionResponse::new(&slot, snapshot),
        }),
    ))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.close(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
