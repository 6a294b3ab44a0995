//! The composition state machine for a single entry.
//!
//! ```text
//!   idle ──submit──▶ analyzing ──success──▶ complete ──edit──▶ idle
//!     ▲                  │
//!     │               failure
//!     │                  ▼
//!     └──(text edit)── error ──submit──▶ analyzing
//! ```
//!
//! The session is plain data: no I/O and no clock. Analysis is split into
//! [`ComposerSession::submit`], which hands out an [`AnalysisTicket`], and
//! [`ComposerSession::resolve`], which applies the outcome only if the ticket
//! is still current. `submit` and `reset` both advance the generation, so a
//! late result from an abandoned request can never overwrite newer state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::MoodAnalysis;
use crate::errors::ServiceError;
use crate::models::entry::NewEntry;
use crate::spectrum::{
    energy_to_color, energy_to_level, generate_alternatives, hsl_to_hex, EnergyLevel, HslColor,
    DEFAULT_ALTERNATIVE_COUNT,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisState {
    #[default]
    Idle,
    Analyzing,
    Complete,
    Error,
}

/// Proof that a session entered `analyzing`. Carries the text to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ComposerSession {
    text: String,
    suggested_color: Option<HslColor>,
    reasoning: Option<String>,
    alternatives: Vec<HslColor>,
    adjusted_color: Option<HslColor>,
    adjusted_energy: Option<f64>,
    energy: Option<f64>,
    analysis_state: AnalysisState,
    error: Option<ServiceError>,
    generation: u64,
}

impl ComposerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session pre-filled with text, e.g. when editing.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn analysis_state(&self) -> AnalysisState {
        self.analysis_state
    }

    pub fn suggested_color(&self) -> Option<HslColor> {
        self.suggested_color
    }

    pub fn adjusted_color(&self) -> Option<HslColor> {
        self.adjusted_color
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    pub fn alternatives(&self) -> &[HslColor] {
        &self.alternatives
    }

    /// Energy reported by the analyzer.
    pub fn energy(&self) -> Option<f64> {
        self.energy
    }

    /// The failure that moved the session into `error`, until text is edited.
    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(ServiceError::user_message)
    }

    /// The user's adjustment if there is one, otherwise the AI suggestion.
    pub fn final_color(&self) -> Option<HslColor> {
        self.adjusted_color.or(self.suggested_color)
    }

    /// Energy matching [`Self::final_color`].
    pub fn final_energy(&self) -> Option<f64> {
        self.adjusted_energy.or(self.energy)
    }

    /// Replaces the text. In `error` this also clears the error so the
    /// composer is editable again; the state itself does not change.
    ///
    /// Returns `false` and keeps the text while `analyzing` or `complete`:
    /// the suggestion always describes the text it was computed from. Use
    /// [`Self::edit`] to reopen a completed entry.
    pub fn text_changed(&mut self, text: impl Into<String>) -> bool {
        if matches!(
            self.analysis_state,
            AnalysisState::Analyzing | AnalysisState::Complete
        ) {
            return false;
        }
        self.text = text.into();
        if self.analysis_state == AnalysisState::Error {
            self.error = None;
        }
        true
    }

    /// Moves `idle`/`error` to `analyzing` and returns the ticket for the
    /// request. Returns `None` without touching anything when the text is
    /// blank or the session is `analyzing` or `complete`.
    pub fn submit(&mut self) -> Option<AnalysisTicket> {
        if !matches!(
            self.analysis_state,
            AnalysisState::Idle | AnalysisState::Error
        ) {
            return None;
        }
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();

        self.generation += 1;
        self.analysis_state = AnalysisState::Analyzing;
        self.error = None;
        self.clear_results();

        Some(AnalysisTicket {
            generation: self.generation,
            text,
        })
    }

    /// Applies an analysis outcome. Returns `false` and changes nothing when
    /// the ticket has been superseded by a later submit or a reset.
    pub fn resolve(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<MoodAnalysis, ServiceError>,
    ) -> bool {
        if ticket.generation != self.generation || self.analysis_state != AnalysisState::Analyzing
        {
            return false;
        }

        match outcome {
            Ok(analysis) => {
                self.suggested_color = Some(energy_to_color(analysis.energy));
                self.alternatives =
                    generate_alternatives(analysis.energy, DEFAULT_ALTERNATIVE_COUNT);
                self.reasoning = Some(analysis.reasoning);
                self.energy = Some(analysis.energy);
                self.adjusted_color = None;
                self.adjusted_energy = None;
                self.analysis_state = AnalysisState::Complete;
            }
            Err(error) => {
                self.error = Some(error);
                self.analysis_state = AnalysisState::Error;
            }
        }
        true
    }

    /// `complete` → `idle`, keeping the text. No-op in other states.
    pub fn edit(&mut self) -> bool {
        if self.analysis_state != AnalysisState::Complete {
            return false;
        }
        self.analysis_state = AnalysisState::Idle;
        true
    }

    /// Slider adjustment. Only meaningful once an analysis is `complete`;
    /// the color is re-derived through the same spectrum as the AI path.
    pub fn adjust_energy(&mut self, energy: f64) -> Option<HslColor> {
        if self.analysis_state != AnalysisState::Complete {
            return None;
        }
        let energy = if energy.is_nan() {
            0.0
        } else {
            energy.clamp(0.0, 1.0)
        };
        let color = energy_to_color(energy);
        self.adjusted_energy = Some(energy);
        self.adjusted_color = Some(color);
        Some(color)
    }

    /// Back to the initial empty state from anywhere. Any in-flight analysis
    /// is orphaned.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    /// The entry to persist for a `complete` session.
    pub fn draft(&self, date: NaiveDate) -> Option<NewEntry> {
        if self.analysis_state != AnalysisState::Complete {
            return None;
        }
        Some(NewEntry {
            text: self.text.trim().to_string(),
            date,
            color: self.final_color()?,
            energy: self.final_energy()?,
            ai_generated: self.adjusted_color.is_none(),
            reasoning: self.reasoning.clone(),
        })
    }

    pub fn snapshot(&self) -> ComposerSnapshot {
        let final_color = self.final_color();
        ComposerSnapshot {
            text: self.text.clone(),
            analysis_state: self.analysis_state,
            suggested_color: self.suggested_color,
            reasoning: self.reasoning.clone(),
            alternatives: self.alternatives.clone(),
            adjusted_color: self.adjusted_color,
            energy: self.energy,
            final_color,
            final_hex: final_color.map(hsl_to_hex),
            final_level: self.final_energy().map(energy_to_level),
            error: self.error_message().map(str::to_string),
            error_code: self.error.as_ref().map(|e| e.code().to_string()),
            retry_after: self.error.as_ref().and_then(ServiceError::retry_after),
        }
    }

    fn clear_results(&mut self) {
        self.suggested_color = None;
        self.reasoning = None;
        self.alternatives.clear();
        self.adjusted_color = None;
        self.adjusted_energy = None;
        self.energy = None;
    }
}

/// Read-only view of a session, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposerSnapshot {
    pub text: String,
    pub analysis_state: AnalysisState,
    pub suggested_color: Option<HslColor>,
    pub reasoning: Option<String>,
    pub alternatives: Vec<HslColor>,
    pub adjusted_color: Option<HslColor>,
    pub energy: Option<f64>,
    pub final_color: Option<HslColor>,
    pub final_hex: Option<String>,
    pub final_level: Option<EnergyLevel>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub retry_after: Option<u64>,
}
