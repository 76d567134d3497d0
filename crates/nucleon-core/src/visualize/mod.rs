//! Quality-control renderings of a segmentation. Nothing here feeds back
//! into measurements.

pub mod boundaries;
pub mod colors;
pub mod histogram;
pub mod overlay;

pub use boundaries::{find_outer_boundaries, render_boundaries};
pub use colors::label_color;
pub use histogram::plot_area_histogram;
pub use overlay::render_overlay;

use image::RgbImage;
use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::{NORMALIZATION_EPSILON, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{NucleonError, Result};
use crate::segmentation::threshold::min_max;

/// Min-max normalize to [0, 1] for display: `(v - min) / (max - min + eps)`.
pub fn normalize_for_display(data: &Array2<f64>) -> Array2<f64> {
    let (min, max) = min_max(data).unwrap_or((0.0, 0.0));
    let scale = max - min + NORMALIZATION_EPSILON;
    data.mapv(|v| (v - min) / scale)
}

/// Render a 3-channel image from a per-pixel color function returning
/// RGB components in [0, 1]. Row-parallel for large images.
pub(crate) fn render_rgb<F>(height: usize, width: usize, pixel: F) -> RgbImage
where
    F: Fn(usize, usize) -> [f32; 3] + Sync,
{
    if height == 0 || width == 0 {
        return RgbImage::new(width as u32, height as u32);
    }

    let render_row = |row: usize| -> Vec<u8> {
        let mut bytes = Vec::with_capacity(width * 3);
        for col in 0..width {
            bytes.extend(pixel(row, col).map(to_u8));
        }
        bytes
    };

    let rows: Vec<Vec<u8>> = if height * width >= PARALLEL_PIXEL_THRESHOLD {
        (0..height).into_par_iter().map(render_row).collect()
    } else {
        (0..height).map(render_row).collect()
    };

    let mut img = RgbImage::new(width as u32, height as u32);
    for (dst, src) in img.chunks_exact_mut(width * 3).zip(rows.iter()) {
        dst.copy_from_slice(src);
    }
    img
}

pub(crate) fn check_same_shape(labels: &Array2<u32>, raw: &Array2<f64>) -> Result<()> {
    if labels.dim() != raw.dim() {
        return Err(NucleonError::ShapeMismatch {
            expected: labels.dim(),
            actual: raw.dim(),
        });
    }
    Ok(())
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
