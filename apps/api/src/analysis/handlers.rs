use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::spectrum::{
    energy_to_color, energy_to_level, generate_alternatives, hsl_to_hex, EnergyLevel, HslColor,
    DEFAULT_ALTERNATIVE_COUNT,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub energy: f64,
    pub reasoning: String,
    pub color: HslColor,
    pub hex: String,
    pub level: EnergyLevel,
    pub alternatives: Vec<HslColor>,
}

/// POST /api/v1/analyze
///
/// Stateless one-shot analysis. Unlike a composer session, analyzer
/// failures come back as HTTP errors.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AppJson(req): AppJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "Please write something first.".to_string(),
        ));
    }

    let analysis = state.analyzer.analyze(text).await?;
    let color = energy_to_color(analysis.energy);
    Ok(Json(AnalyzeResponse {
        energy: analysis.energy,
        reasoning: analysis.reasoning,
        color,
        hex: hsl_to_hex(color),
        level: energy_to_level(analysis.energy),
        alternatives: generate_alternatives(analysis.energy, DEFAULT_ALTERNATIVE_COUNT),
    }))
}
