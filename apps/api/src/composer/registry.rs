use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::analysis::MoodAnalyzer;
use crate::composer::session::{AnalysisState, ComposerSession, ComposerSnapshot};
use crate::errors::{AppError, ServiceError};

/// One open composer plus its bookkeeping.
pub struct SessionSlot {
    pub id: Uuid,
    pub user_id: Uuid,
    session: Mutex<ComposerSession>,
    last_used: Mutex<Instant>,
}

impl SessionSlot {
    fn new(user_id: Uuid, session: ComposerSession) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            session: Mutex::new(session),
            last_used: Mutex::new(Instant::now()),
        }
    }

    /// Locks the session and marks it as recently used.
    pub async fn lock(&self) -> MutexGuard<'_, ComposerSession> {
        *self.last_used.lock().await = Instant::now();
        self.session.lock().await
    }

    async fn idle_for(&self) -> Duration {
        self.last_used.lock().await.elapsed()
    }
}

/// In-process table of open composer sessions keyed by id.
///
/// Sessions are ephemeral: they are dropped after `ttl` without use and are
/// never persisted. Only saved entries outlive the process.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<SessionSlot>>>>,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn open(&self, user_id: Uuid, session: ComposerSession) -> Arc<SessionSlot> {
        let slot = Arc::new(SessionSlot::new(user_id, session));
        self.sessions
            .write()
            .await
            .insert(slot.id, Arc::clone(&slot));
        debug!("Opened composer session {} for user {user_id}", slot.id);
        slot
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<SessionSlot>, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn close(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Drops sessions idle for longer than the TTL. Sessions that are locked
    /// right now or waiting on an analysis are kept. Returns the number
    /// removed.
    pub async fn prune_idle(&self) -> usize {
        let candidates: Vec<Arc<SessionSlot>> =
            self.sessions.read().await.values().cloned().collect();

        let mut expired = Vec::new();
        for slot in candidates {
            let busy = match slot.session.try_lock() {
                Ok(session) => session.analysis_state() == AnalysisState::Analyzing,
                Err(_) => true,
            };
            if busy {
                continue;
            }
            if slot.idle_for().await > self.ttl {
                expired.push(slot.id);
            }
        }

        if expired.is_empty() {
            return 0;
        }
        let mut sessions = self.sessions.write().await;
        for id in &expired {
            sessions.remove(id);
        }
        info!("Pruned {} idle composer sessions", expired.len());
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Runs one analysis round for `slot` and returns the resulting snapshot.
///
/// The analyzer call runs on its own task so that the session is resolved
/// even if the caller's request future is dropped. A result that arrives
/// after the session was reset or resubmitted is discarded.
pub async fn submit_analysis(
    slot: Arc<SessionSlot>,
    analyzer: Arc<dyn MoodAnalyzer>,
) -> ComposerSnapshot {
    let ticket = {
        let mut session = slot.lock().await;
        match session.submit() {
            Some(ticket) => ticket,
            None => return session.snapshot(),
        }
    };

    let task_slot = Arc::clone(&slot);
    let task_ticket = ticket.clone();
    let task = tokio::spawn(async move {
        let outcome = analyzer.analyze(&task_ticket.text).await;
        if let Err(e) = &outcome {
            info!("Analysis for session {} failed: {}", task_slot.id, e.code());
        }
        let mut session = task_slot.lock().await;
        if !session.resolve(&task_ticket, outcome) {
            debug!("Discarded stale analysis for session {}", task_slot.id);
        }
        session.snapshot()
    });

    match task.await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Analysis task for session {} aborted: {e}", slot.id);
            let mut session = slot.lock().await;
            session.resolve(&ticket, Err(ServiceError::Unknown));
            session.snapshot()
        }
    }
}
