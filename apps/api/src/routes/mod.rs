pub mod health;
pub mod spectrum;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::calendar::handlers as calendar;
use crate::composer::handlers as composer;
use crate::entries::handlers as entries;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/spectrum", get(spectrum::spectrum_handler))
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        // Entries
        .route(
            "/api/v1/entries",
            post(entries::handle_create_entry).get(entries::handle_list_entries),
        )
        .route(
            "/api/v1/calendar/:year/:month",
            get(calendar::handle_get_month),
        )
        // Composer sessions
        .route("/api/v1/sessions", post(composer::handle_open_session))
        .route(
            "/api/v1/sessions/:id",
            get(composer::handle_get_session).delete(composer::handle_close_session),
        )
        .route("/api/v1/sessions/:id/text", put(composer::handle_update_text))
        .route("/api/v1/sessions/:id/submit", post(composer::handle_submit))
        .route("/api/v1/sessions/:id/edit", post(composer::handle_edit))
        .route(
            "/api/v1/sessions/:id/energy",
            put(composer::handle_adjust_energy),
        )
        .route("/api/v1/sessions/:id/reset", post(composer::handle_reset))
        .route("/api/v1/sessions/:id/save", post(composer::handle_save))
        .with_state(state)
}
