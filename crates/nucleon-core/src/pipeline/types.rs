use std::path::PathBuf;

use ndarray::Array2;

use crate::measure::MeasurementTable;
use crate::segmentation::LabelImage;

/// Per-image processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Loading,
    BackgroundCorrection,
    Segmentation,
    Labeling,
    Measuring,
    Rendering,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading image"),
            Self::BackgroundCorrection => write!(f, "Correcting background"),
            Self::Segmentation => write!(f, "Segmenting nuclei"),
            Self::Labeling => write!(f, "Labeling nuclei"),
            Self::Measuring => write!(f, "Measuring nuclei"),
            Self::Rendering => write!(f, "Rendering QC images"),
            Self::Writing => write!(f, "Writing outputs"),
        }
    }
}

/// Everything the core produces for one image.
#[derive(Clone, Debug)]
pub struct ImageAnalysis {
    pub image_id: String,
    /// Median of the raw image.
    pub background_level: f64,
    /// Background-corrected intensities.
    pub corrected: Array2<f64>,
    pub labels: LabelImage,
    pub measurements: MeasurementTable,
}

/// A successfully processed image.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRecord {
    pub image_id: String,
    pub source: PathBuf,
    pub background_level: f64,
    pub nuclei: usize,
}

/// An image skipped under `ErrorPolicy::Skip`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFailure {
    pub image_id: String,
    pub source: PathBuf,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    pub images: Vec<ImageRecord>,
    pub failures: Vec<ImageFailure>,
    /// Concatenated measurements of all processed images.
    pub measurements: MeasurementTable,
    /// Where the CSV was written; `None` when no image was processed.
    pub measurements_path: Option<PathBuf>,
}

impl BatchReport {
    pub fn total_nuclei(&self) -> usize {
        self.measurements.len()
    }

    /// Nucleus count per processed image, in processing order, including
    /// images with no nuclei.
    pub fn nuclei_counts(&self) -> Vec<(String, usize)> {
        self.images
            .iter()
            .map(|img| (img.image_id.clone(), img.nuclei))
            .collect()
    }
}

/// Thread-safe progress reporting for batch runs.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// The batch is starting with `total_images` discovered images.
    fn begin_batch(&self, _total_images: usize) {}

    /// Image number `index` (0-based) is starting.
    fn begin_image(&self, _index: usize, _image_id: &str) {}

    /// A stage within the current image has started.
    fn begin_stage(&self, _stage: PipelineStage) {}

    /// The current image finished successfully.
    fn finish_image(&self, _record: &ImageRecord) {}

    /// The current image failed and was skipped.
    fn skip_image(&self, _failure: &ImageFailure) {}

    /// The batch is finished.
    fn finish_batch(&self, _report: &BatchReport) {}
}

/// No-op progress reporter, used when `run_batch` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
