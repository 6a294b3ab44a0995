use axum::Json;
use serde::Serialize;

use crate::spectrum::{spectrum_gradient, SpectrumGradient};

#[derive(Serialize)]
pub struct SpectrumResponse {
    #[serde(flatten)]
    pub gradient: SpectrumGradient,
    pub css: String,
}

/// GET /api/v1/spectrum
/// The energy spectrum sampled for slider backgrounds.
pub async fn spectrum_handler() -> Json<SpectrumResponse> {
    let gradient = spectrum_gradient();
    let css = gradient.to_css();
    Json(SpectrumResponse { gradient, css })
}
