use ndarray::Array2;
use tracing::debug;

use crate::error::{NucleonError, Result};

use super::config::{SegmentationConfig, ThresholdReference};
use super::morphology::{fill_holes, remove_small_objects};
use super::threshold::otsu_threshold;

/// Build the cleaned binary nucleus mask for one image.
///
/// Pipeline: shift by background -> Otsu threshold -> binary mask ->
/// small-object removal -> hole filling.
pub fn segment_foreground(
    raw: &Array2<f64>,
    background_level: f64,
    config: &SegmentationConfig,
) -> Result<Array2<bool>> {
    let min_size = config.min_object_size()?;
    if raw.is_empty() {
        let (h, w) = raw.dim();
        return Err(NucleonError::InvalidInput(format!(
            "cannot segment an empty image ({w}x{h})"
        )));
    }

    // Step 1: Threshold selection on the background-shifted histogram.
    let shifted = raw.mapv(|v| v - background_level);
    let threshold = otsu_threshold(&shifted);

    // Step 2: Binary mask.
    let mask = match config.threshold_reference {
        ThresholdReference::Raw => raw.mapv(|v| v > threshold),
        ThresholdReference::BackgroundSubtracted => shifted.mapv(|v| v > threshold),
    };
    debug!(
        background_level,
        threshold,
        reference = %config.threshold_reference,
        foreground_pixels = mask.iter().filter(|&&m| m).count(),
        "Foreground threshold applied"
    );

    // Step 3: Drop debris below the size cut.
    let cleaned = remove_small_objects(&mask, min_size, config.connectivity);

    // Step 4: Close enclosed background.
    Ok(fill_holes(&cleaned, config.connectivity))
}
