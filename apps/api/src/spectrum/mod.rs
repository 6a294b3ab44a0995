// Energy spectrum: maps a 0–1 energy value onto the mood color wheel.
// Every function here is pure and total; nothing in this module can fail.

pub mod aggregate;
pub mod color;
pub mod energy;

pub use aggregate::{average_colors, DEFAULT_DAY_COLOR};
pub use color::{hsl_to_hex, hsl_to_string, HslColor};
pub use energy::{
    energy_to_color, energy_to_level, generate_alternatives, spectrum_gradient, EnergyLevel,
    SpectrumGradient, DEFAULT_ALTERNATIVE_COUNT,
};
