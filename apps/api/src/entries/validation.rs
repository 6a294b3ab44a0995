use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::MAX_REASONING_CHARS;
use crate::calendar::parse_iso_date;
use crate::errors::AppError;
use crate::models::entry::NewEntry;
use crate::spectrum::HslColor;

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub user_id: Uuid,
    pub text: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub color: HslColor,
    pub energy: f64,
    #[serde(default)]
    pub ai_generated: bool,
    pub reasoning: Option<String>,
}

impl CreateEntryRequest {
    /// Validates the request and returns the owner plus the entry to store.
    pub fn into_new_entry(self) -> Result<(Uuid, NewEntry), AppError> {
        let date = parse_iso_date("date", &self.date)?;
        let entry = NewEntry {
            text: self.text.trim().to_string(),
            date,
            color: self.color,
            energy: self.energy,
            ai_generated: self.ai_generated,
            reasoning: self.reasoning,
        };
        validate_new_entry(&entry)?;
        Ok((self.user_id, entry))
    }
}

/// Boundary checks applied to every entry before it reaches a store.
pub fn validate_new_entry(entry: &NewEntry) -> Result<(), AppError> {
    if entry.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Please write something first.".to_string(),
        ));
    }
    if !entry.color.is_valid() {
        return Err(AppError::Validation(format!(
            "color out of range: {}",
            entry.color
        )));
    }
    if !entry.energy.is_finite() || !(0.0..=1.0).contains(&entry.energy) {
        return Err(AppError::Validation(
            "energy must be between 0 and 1".to_string(),
        ));
    }
    if let Some(reasoning) = &entry.reasoning {
        if reasoning.chars().count() > MAX_REASONING_CHARS {
            return Err(AppError::Validation(format!(
                "reasoning must be at most {MAX_REASONING_CHARS} characters"
            )));
        }
    }
    Ok(())
}
