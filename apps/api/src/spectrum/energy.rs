//! Energy → level / color mapping.
//!
//! Hue sweeps from cool blues (depleted) to warm corals (high) across five
//! linear segments. The segments are deliberately uneven: "elevated" swings
//! 100° through the greens into yellows over the same 0.2 energy width that
//! the others cover with 30–40°, which keeps anxious/excited readings visually
//! apart from balanced ones.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::color::{hsl_to_hex, HslColor};

/// Number of alternatives offered next to an AI suggestion.
pub const DEFAULT_ALTERNATIVE_COUNT: usize = 5;

/// Energy distance between neighbouring alternatives.
const ALTERNATIVE_STEP: f64 = 0.05;

/// Number of sample points (inclusive of both ends) in the spectrum gradient.
const GRADIENT_STOPS: u8 = 11;

/// Coarse five-bucket classification of an energy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Depleted,
    Low,
    Balanced,
    Elevated,
    High,
}

impl EnergyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Depleted => "depleted",
            EnergyLevel::Low => "low",
            EnergyLevel::Balanced => "balanced",
            EnergyLevel::Elevated => "elevated",
            EnergyLevel::High => "high",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "depleted" => Ok(EnergyLevel::Depleted),
            "low" => Ok(EnergyLevel::Low),
            "balanced" => Ok(EnergyLevel::Balanced),
            "elevated" => Ok(EnergyLevel::Elevated),
            "high" => Ok(EnergyLevel::High),
            other => Err(format!("unknown energy level '{other}'")),
        }
    }
}

/// Buckets an energy value. Inputs outside `[0, 1]` land in the end buckets.
pub fn energy_to_level(energy: f64) -> EnergyLevel {
    if energy < 0.2 {
        EnergyLevel::Depleted
    } else if energy < 0.4 {
        EnergyLevel::Low
    } else if energy < 0.6 {
        EnergyLevel::Balanced
    } else if energy < 0.8 {
        EnergyLevel::Elevated
    } else {
        EnergyLevel::High
    }
}

/// Maps an energy value to its spectrum color.
///
/// The input is clamped to `[0, 1]`. By construction the result satisfies
/// `h ∈ [10, 250]`, `s ∈ [45, 70]` and `l ∈ [50, 60]`.
pub fn energy_to_color(energy: f64) -> HslColor {
    let e = clamp_energy(energy);

    let hue = if e < 0.2 {
        segment(e, 0.0, 250.0, 220.0)
    } else if e < 0.4 {
        segment(e, 0.2, 220.0, 180.0)
    } else if e < 0.6 {
        segment(e, 0.4, 180.0, 140.0)
    } else if e < 0.8 {
        segment(e, 0.6, 140.0, 40.0)
    } else {
        segment(e, 0.8, 40.0, 10.0)
    };

    // Saturation peaks at 0.5 and eases off toward both extremes.
    let saturation = 45.0 + (e * PI).sin() * 25.0;
    let lightness = 50.0 + e * 10.0;

    HslColor::new(
        hue.round() as u16,
        saturation.round() as u8,
        lightness.round() as u8,
    )
}

/// Linear hue interpolation over one 0.2-wide energy segment.
fn segment(e: f64, segment_start: f64, hue_start: f64, hue_end: f64) -> f64 {
    hue_start - ((e - segment_start) / 0.2) * (hue_start - hue_end)
}

fn clamp_energy(energy: f64) -> f64 {
    if energy.is_nan() {
        return 0.0;
    }
    energy.clamp(0.0, 1.0)
}

/// `count` colors centered on `energy`, spaced 0.05 apart.
///
/// Index `count / 2` sits on `energy` itself. Offsets are clamped one by one,
/// so near the ends of the spectrum repeated colors are expected.
pub fn generate_alternatives(energy: f64, count: usize) -> Vec<HslColor> {
    let center = (count / 2) as f64;
    (0..count)
        .map(|i| {
            let offset = (i as f64 - center) * ALTERNATIVE_STEP;
            energy_to_color(clamp_energy(energy + offset))
        })
        .collect()
}

/// One sampled point of the spectrum gradient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: HslColor,
    pub hex: String,
    /// Position along the gradient, 0–100.
    pub position: u8,
}

/// The full spectrum sampled at eleven evenly spaced energies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumGradient {
    pub stops: Vec<GradientStop>,
}

impl SpectrumGradient {
    /// CSS `linear-gradient(to right, ...)` for the sampled stops.
    pub fn to_css(&self) -> String {
        let stops: Vec<String> = self
            .stops
            .iter()
            .map(|stop| format!("{} {}%", stop.color, stop.position))
            .collect();
        format!("linear-gradient(to right, {})", stops.join(", "))
    }
}

/// Samples [`energy_to_color`] at `i / 10` for `i = 0..=10`.
pub fn spectrum_gradient() -> SpectrumGradient {
    let last = GRADIENT_STOPS - 1;
    let stops = (0..GRADIENT_STOPS)
        .map(|i| {
            let color = energy_to_color(f64::from(i) / f64::from(last));
            GradientStop {
                color,
                hex: hsl_to_hex(color),
                position: i * (100 / last),
            }
        })
        .collect();
    SpectrumGradient { stops }
}
