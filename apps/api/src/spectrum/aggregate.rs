use super::color::HslColor;

/// Neutral "balanced" color used for a day without entries.
pub const DEFAULT_DAY_COLOR: HslColor = HslColor::new(160, 50, 50);

/// Averages several colors into one.
///
/// Saturation and lightness use the arithmetic mean. Hue is cyclic, so it uses
/// the circular mean: sum the unit vectors of each hue and take the angle of
/// the result. Averaging 350° and 10° therefore gives 0°, not 180°.
pub fn average_colors(colors: &[HslColor]) -> HslColor {
    match colors {
        [] => DEFAULT_DAY_COLOR,
        [single] => *single,
        _ => {
            let (mut sin_sum, mut cos_sum) = (0.0_f64, 0.0_f64);
            let (mut s_sum, mut l_sum) = (0.0_f64, 0.0_f64);

            for color in colors {
                let radians = f64::from(color.h).to_radians();
                sin_sum += radians.sin();
                cos_sum += radians.cos();
                s_sum += f64::from(color.s);
                l_sum += f64::from(color.l);
            }

            let mut hue = sin_sum.atan2(cos_sum).to_degrees();
            if hue < 0.0 {
                hue += 360.0;
            }
            let n = colors.len() as f64;

            HslColor::new(
                // 359.6 rounds up to the seam; fold it back onto 0.
                (hue.round() as u16) % 360,
                (s_sum / n).round() as u8,
                (l_sum / n).round() as u8,
            )
        }
    }
}
