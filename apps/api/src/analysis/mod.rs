//! Energy analysis, the seam between the composer and whatever infers energy
//! from text.
//!
//! `AppState` holds an `Arc<dyn MoodAnalyzer>`. The production backend is
//! [`llm::LlmMoodAnalyzer`]; tests plug in scripted analyzers.

pub mod handlers;
pub mod llm;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ServiceError;

/// Upper bound on the model's explanation, in characters.
pub const MAX_REASONING_CHARS: usize = 200;

/// A validated analysis result. `energy` is always finite and in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub energy: f64,
    pub reasoning: String,
}

#[async_trait]
pub trait MoodAnalyzer: Send + Sync {
    /// Infers the energy of a non-empty entry text.
    async fn analyze(&self, text: &str) -> Result<MoodAnalysis, ServiceError>;
}

/// Shape the model is asked to produce. Unknown extra fields are ignored.
#[derive(Debug, Deserialize)]
struct RawMoodAnalysis {
    energy: f64,
    reasoning: String,
    #[serde(default)]
    #[allow(dead_code)]
    keywords: Option<Vec<String>>,
}

/// Checks an untrusted tool payload before any field reaches the spectrum.
///
/// Every mismatch is reported as [`ServiceError::Unknown`].
pub fn validate_analysis_payload(input: &serde_json::Value) -> Result<MoodAnalysis, ServiceError> {
    let raw: RawMoodAnalysis = serde_json::from_value(input.clone()).map_err(|e| {
        warn!("Analysis payload has the wrong shape: {e}");
        ServiceError::Unknown
    })?;

    if !raw.energy.is_finite() || !(0.0..=1.0).contains(&raw.energy) {
        warn!("Analysis energy out of range: {}", raw.energy);
        return Err(ServiceError::Unknown);
    }

    if raw.reasoning.chars().count() > MAX_REASONING_CHARS {
        warn!(
            "Analysis reasoning too long: {} chars",
            raw.reasoning.chars().count()
        );
        return Err(ServiceError::Unknown);
    }

    Ok(MoodAnalysis {
        energy: raw.energy,
        reasoning: raw.reasoning,
    })
}
