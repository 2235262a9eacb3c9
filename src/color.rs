use eframe::egui::Color32;
use palette::Srgb;

/// 8-bit RGB triple handed to the renderer.
pub type Rgb = Srgb<u8>;

// ---------------------------------------------------------------------------
// Diverging scale: Blue ↔ White ↔ Red over [-1, 1]
// ---------------------------------------------------------------------------

pub const NEGATIVE: Rgb = Srgb::new(0, 90, 255);
pub const NEUTRAL: Rgb = Srgb::new(255, 255, 255);
pub const POSITIVE: Rgb = Srgb::new(255, 60, 60);

fn lerp_channel(a: u8, b: u8, tt: f64) -> u8 {
    let (a, b) = (f64::from(a), f64::from(b));
    (a + (b - a) * tt).round() as u8
}

fn lerp(from: Rgb, to: Rgb, tt: f64) -> Rgb {
    Srgb::new(
        lerp_channel(from.red, to.red, tt),
        lerp_channel(from.green, to.green, tt),
        lerp_channel(from.blue, to.blue, tt),
    )
}

/// Color of a correlation coefficient.
///
/// `v` is clamped to [-1, 1] and mapped to `t = (v + 1) / 2`; the lower half
/// runs blue → white, the upper half white → red. NaN is treated as neutral.
pub fn color_for(v: f64) -> Rgb {
    if v.is_nan() {
        return NEUTRAL;
    }
    let t = (v.clamp(-1.0, 1.0) + 1.0) / 2.0;
    if t <= 0.5 {
        lerp(NEGATIVE, NEUTRAL, t / 0.5)
    } else {
        lerp(NEUTRAL, POSITIVE, (t - 0.5) / 0.5)
    }
}

/// Legend gradient stops as `(offset, color)`, offsets in [0, 1].
///
/// Always derived from [`color_for`] so legend and cells cannot drift apart.
pub fn legend_stops() -> [(f32, Rgb); 3] {
    [
        (0.0, color_for(-1.0)),
        (0.5, color_for(0.0)),
        (1.0, color_for(1.0)),
    ]
}

pub fn to_color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Text color that stays readable on top of `color_for(v)`.
pub fn label_color_for(v: f64) -> Color32 {
    if v.abs() > 0.6 {
        Color32::WHITE
    } else {
        Color32::from_rgb(17, 24, 39)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(c: Rgb) -> (u8, u8, u8) {
        (c.red, c.green, c.blue)
    }

    #[test]
    fn boundary_values_hit_the_stops_exactly() {
        assert_eq!(triple(color_for(-1.0)), (0, 90, 255));
        assert_eq!(triple(color_for(0.0)), (255, 255, 255));
        assert_eq!(triple(color_for(1.0)), (255, 60, 60));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(color_for(-3.0), color_for(-1.0));
        assert_eq!(color_for(42.0), color_for(1.0));
        assert_eq!(color_for(f64::INFINITY), color_for(1.0));
        assert_eq!(color_for(f64::NEG_INFINITY), color_for(-1.0));
    }

    #[test]
    fn midpoints_round_each_channel() {
        // t = 0.25 → tt = 0.5 between blue and white
        assert_eq!(triple(color_for(-0.5)), (128, 173, 255));
        // t = 0.75 → tt = 0.5 between white and red
        assert_eq!(triple(color_for(0.5)), (255, 158, 158));
    }

    #[test]
    fn scale_is_continuous_at_zero() {
        let below = color_for(-1e-9);
        let above = color_for(1e-9);
        assert_eq!(below, NEUTRAL);
        assert_eq!(above, NEUTRAL);
    }

    #[test]
    fn nan_is_neutral() {
        assert_eq!(color_for(f64::NAN), NEUTRAL);
    }

    #[test]
    fn legend_matches_cell_colors() {
        let stops = legend_stops();
        assert_eq!(stops[0], (0.0, color_for(-1.0)));
        assert_eq!(stops[1], (0.5, color_for(0.0)));
        assert_eq!(stops[2], (1.0, color_for(1.0)));
    }

    #[test]
    fn converts_to_egui_color() {
        assert_eq!(to_color32(color_for(1.0)), Color32::from_rgb(255, 60, 60));
    }
}
