use palette::{FromColor, Hsl, Srgb};

use crate::consts::{LABEL_HUE_STEP_DEGREES, LABEL_LIGHTNESS, LABEL_SATURATION};

/// Display color for a label as RGB in [0, 1].
///
/// Consecutive labels are a golden angle apart in hue, so neighbors stay
/// distinguishable however many labels there are.
pub fn label_color(label: u32) -> [f32; 3] {
    let hue = ((label.saturating_sub(1)) as f32 * LABEL_HUE_STEP_DEGREES) % 360.0;
    let hsl: Hsl = Hsl::new(hue, LABEL_SATURATION, LABEL_LIGHTNESS);
    let rgb: Srgb = Srgb::from_color(hsl);
    [rgb.red, rgb.green, rgb.blue]
}
