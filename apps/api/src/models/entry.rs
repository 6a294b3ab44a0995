use anyhow::{anyhow, Context};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::spectrum::{energy_to_level, EnergyLevel, HslColor};

/// A saved journal entry. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub color: HslColor,
    pub energy_level: EnergyLevel,
    pub energy_value: f64,
    pub ai_generated: bool,
    pub reasoning: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    /// Builds the stored shape of `entry`. The level is always derived from
    /// the energy value, never taken from the caller.
    pub fn from_new(id: Uuid, user_id: Uuid, entry: NewEntry, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            energy_level: energy_to_level(entry.energy),
            text: entry.text,
            color: entry.color,
            energy_value: entry.energy,
            ai_generated: entry.ai_generated,
            reasoning: entry.reasoning,
            date: entry.date,
            created_at,
        }
    }
}

/// An entry ready to be handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub text: String,
    pub date: NaiveDate,
    pub color: HslColor,
    pub energy: f64,
    pub ai_generated: bool,
    pub reasoning: Option<String>,
}

/// All entries of one calendar day, reduced to a single color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMood {
    pub date: NaiveDate,
    pub dominant_color: HslColor,
    pub energy_level: EnergyLevel,
    pub entry_count: usize,
    pub entries: Vec<MoodEntry>,
}

#[derive(Debug, Clone, FromRow)]
pub struct EntryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub color_h: i16,
    pub color_s: i16,
    pub color_l: i16,
    pub energy_value: f64,
    pub energy_level: String,
    pub ai_generated: bool,
    pub reasoning: Option<String>,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<EntryRow> for MoodEntry {
    type Error = anyhow::Error;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let color = HslColor::new(
            u16::try_from(row.color_h).context("color_h out of range")?,
            u8::try_from(row.color_s).context("color_s out of range")?,
            u8::try_from(row.color_l).context("color_l out of range")?,
        );
        let energy_level = row
            .energy_level
            .parse::<EnergyLevel>()
            .map_err(|e| anyhow!("entry {}: {e}", row.id))?;

        Ok(MoodEntry {
            id: row.id,
            user_id: row.user_id,
            text: row.text,
            color,
            energy_level,
            energy_value: row.energy_value,
            ai_generated: row.ai_generated,
            reasoning: row.reasoning,
            date: row.entry_date,
            created_at: row.created_at,
        })
    }
}
