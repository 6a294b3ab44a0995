//! HSL color value type and its CSS / hex renderings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An HSL color with integer channels.
///
/// `h` is degrees in `[0, 360)`, `s` and `l` are percentages in `[0, 100]`.
/// Values are never mutated in place; derive a new color instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HslColor {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl HslColor {
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    /// True when every channel is inside its documented range.
    pub fn is_valid(&self) -> bool {
        self.h < 360 && self.s <= 100 && self.l <= 100
    }

    /// Parses the `hsl(h, s%, l%)` form produced by [`hsl_to_string`].
    pub fn parse_css(input: &str) -> Option<Self> {
        let inner = input.trim().strip_prefix("hsl(")?.strip_suffix(')')?;
        let mut parts = inner.split(',').map(str::trim);

        let h = parts.next()?.parse::<u16>().ok()?;
        let s = parts.next()?.strip_suffix('%')?.parse::<u8>().ok()?;
        let l = parts.next()?.strip_suffix('%')?.parse::<u8>().ok()?;
        if parts.next().is_some() {
            return None;
        }

        let color = Self::new(h, s, l);
        color.is_valid().then_some(color)
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// CSS `hsl()` string, e.g. `hsl(160, 50%, 50%)`.
pub fn hsl_to_string(color: HslColor) -> String {
    color.to_string()
}

/// Lower-case `#rrggbb` using the standard hexant conversion.
pub fn hsl_to_hex(color: HslColor) -> String {
    let h = f64::from(color.h);
    let s = f64::from(color.s) / 100.0;
    let l = f64::from(color.l) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    format!("#{:02x}{:02x}{:02x}", channel(r + m), channel(g + m), channel(b + m))
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues_to_hex() {
        assert_eq!(hsl_to_hex(HslColor::new(0, 100, 50)), "#ff0000");
        assert_eq!(hsl_to_hex(HslColor::new(120, 100, 50)), "#00ff00");
        assert_eq!(hsl_to_hex(HslColor::new(240, 100, 50)), "#0000ff");
    }

    #[test]
    fn test_secondary_hues_to_hex() {
        assert_eq!(hsl_to_hex(HslColor::new(60, 100, 50)), "#ffff00");
        assert_eq!(hsl_to_hex(HslColor::new(180, 100, 50)), "#00ffff");
        assert_eq!(hsl_to_hex(HslColor::new(300, 100, 50)), "#ff00ff");
    }

    #[test]
    fn test_greyscale_ignores_hue() {
        assert_eq!(hsl_to_hex(HslColor::new(0, 0, 0)), "#000000");
        assert_eq!(hsl_to_hex(HslColor::new(200, 0, 100)), "#ffffff");
        assert_eq!(hsl_to_hex(HslColor::new(90, 0, 50)), "#808080");
    }

    #[test]
    fn test_hsl_to_string_format() {
        assert_eq!(hsl_to_string(HslColor::new(160, 50, 50)), "hsl(160, 50%, 50%)");
    }

    #[test]
    fn test_parse_css_reads_back_rendered_string() {
        let color = HslColor::new(212, 63, 55);
        assert_eq!(HslColor::parse_css(&hsl_to_string(color)), Some(color));
    }

    #[test]
    fn test_parse_css_rejects_garbage() {
        assert_eq!(HslColor::parse_css("rgb(1, 2, 3)"), None);
        assert_eq!(HslColor::parse_css("hsl(10, 20, 30)"), None);
        assert_eq!(HslColor::parse_css("hsl(400, 20%, 30%)"), None);
        assert_eq!(HslColor::parse_css("hsl(10, 20%, 30%, 1)"), None);
    }

    #[test]
    fn test_is_valid_bounds() {
        assert!(HslColor::new(359, 100, 100).is_valid());
        assert!(!HslColor::new(360, 50, 50).is_valid());
        assert!(!HslColor::new(0, 101, 50).is_valid());
        assert!(!HslColor::new(0, 50, 101).is_valid());
    }
}
