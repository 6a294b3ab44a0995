//! Entry store: pluggable persistence behind a trait.
//!
//! `AppState` holds an `Arc<dyn EntryStore>`: [`PgEntryStore`] when
//! `DATABASE_URL` is configured, [`InMemoryEntryStore`] otherwise.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::calendar::DateRange;
use crate::errors::AppError;
use crate::models::entry::{EntryRow, MoodEntry, NewEntry};
use crate::spectrum::energy_to_level;

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Persists `entry`, assigning `id` and `created_at`.
    async fn insert(&self, user_id: Uuid, entry: NewEntry) -> Result<MoodEntry, AppError>;

    /// All of a user's entries dated inside `range`, ordered by date then
    /// creation time.
    async fn list_range(&self, user_id: Uuid, range: DateRange)
        -> Result<Vec<MoodEntry>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn insert(&self, user_id: Uuid, entry: NewEntry) -> Result<MoodEntry, AppError> {
        let row: EntryRow = sqlx::query_as(
            r#"
            INSERT INTO entries
                (id, user_id, text, color_h, color_s, color_l,
                 energy_value, energy_level, ai_generated, reasoning, entry_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, user_id, text, color_h, color_s, color_l,
                      energy_value, energy_level, ai_generated, reasoning,
                      entry_date, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&entry.text)
        .bind(entry.color.h as i16)
        .bind(i16::from(entry.color.s))
        .bind(i16::from(entry.color.l))
        .bind(entry.energy)
        .bind(energy_to_level(entry.energy).as_str())
        .bind(entry.ai_generated)
        .bind(entry.reasoning.as_deref())
        .bind(entry.date)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted entry {} for user {user_id}", row.id);

        MoodEntry::try_from(row).map_err(AppError::Internal)
    }

    async fn list_range(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<MoodEntry>, AppError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, text, color_h, color_s, color_l,
                   energy_value, energy_level, ai_generated, reasoning,
                   entry_date, created_at
            FROM entries
            WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
            ORDER BY entry_date, created_at
            "#,
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| MoodEntry::try_from(row).map_err(AppError::Internal))
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store for development and tests. Contents are lost on exit.
#[derive(Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<Vec<MoodEntry>>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn insert(&self, user_id: Uuid, entry: NewEntry) -> Result<MoodEntry, AppError> {
        let saved = MoodEntry::from_new(Uuid::new_v4(), user_id, entry, Utc::now());
        self.entries.write().await.push(saved.clone());
        info!("Stored entry {} for user {user_id} in memory", saved.id);
        Ok(saved)
    }

    async fn list_range(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<MoodEntry>, AppError> {
        let mut found: Vec<MoodEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id && range.contains(e.date))
            .cloned()
            .collect();
        found.sort_by_key(|e| (e.date, e.created_at));
        Ok(found)
    }
}
