use std::sync::Arc;

use crate::analysis::MoodAnalyzer;
use crate::composer::SessionRegistry;
use crate::entries::EntryStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analyzer. Production: `LlmMoodAnalyzer`.
    pub analyzer: Arc<dyn MoodAnalyzer>,
    /// Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub entries: Arc<dyn EntryStore>,
    pub sessions: SessionRegistry,
}
