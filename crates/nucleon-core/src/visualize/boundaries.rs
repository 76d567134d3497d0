use image::RgbImage;
use ndarray::Array2;

use crate::error::Result;
use crate::segmentation::components::neighbor;
use crate::segmentation::Connectivity;

use super::{check_same_shape, normalize_for_display, render_rgb};

/// Outer boundary pixels: pixels with an edge neighbor carrying a different,
/// positive label. This is the ring of background just outside each region;
/// where two regions touch, both sides of the contact are marked.
pub fn find_outer_boundaries(labels: &Array2<u32>) -> Array2<bool> {
    let (h, w) = labels.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        let own = labels[[row, col]];
        Connectivity::Four.neighbors().iter().any(|&(dr, dc)| {
            neighbor(row, col, dr, dc, h, w).is_some_and(|(nr, nc)| {
                let other = labels[[nr, nc]];
                other != 0 && other != own
            })
        })
    })
}

/// Normalized raw image as 3-channel gray with outer boundaries in white.
pub fn render_boundaries(raw: &Array2<f64>, labels: &Array2<u32>) -> Result<RgbImage> {
    check_same_shape(labels, raw)?;
    let gray = normalize_for_display(raw);
    let boundaries = find_outer_boundaries(labels);
    let (h, w) = raw.dim();

    Ok(render_rgb(h, w, |row, col| {
        if boundaries[[row, col]] {
            [1.0; 3]
        } else {
            [gray[[row, col]] as f32; 3]
        }
    }))
}
