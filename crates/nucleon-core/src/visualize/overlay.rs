use image::RgbImage;
use ndarray::Array2;

use crate::consts::OVERLAY_ALPHA;
use crate::error::Result;

use super::colors::label_color;
use super::{check_same_shape, normalize_for_display, render_rgb};

/// Blend label colors at [`OVERLAY_ALPHA`] over the normalized raw image.
///
/// Background pixels show the grayscale image unchanged.
pub fn render_overlay(raw: &Array2<f64>, labels: &Array2<u32>) -> Result<RgbImage> {
    check_same_shape(labels, raw)?;
    let gray = normalize_for_display(raw);
    let (h, w) = raw.dim();

    Ok(render_rgb(h, w, |row, col| {
        let g = gray[[row, col]] as f32;
        match labels[[row, col]] {
            0 => [g; 3],
            lbl => label_color(lbl).map(|c| OVERLAY_ALPHA * c + (1.0 - OVERLAY_ALPHA) * g),
        }
    }))
}
