use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::measure::QcConfig;
use crate::segmentation::SegmentationConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory scanned for `*.tif` / `*.tiff` images.
    pub input_dir: PathBuf,
    /// Root of all outputs.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub on_error: ErrorPolicy,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub outputs: OutputConfig,
    #[serde(default)]
    pub qc: QcConfig,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            on_error: ErrorPolicy::default(),
            segmentation: SegmentationConfig::default(),
            outputs: OutputConfig::default(),
            qc: QcConfig::default(),
        }
    }
}

/// Which per-image artifacts are written. The measurement CSV is always written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "enabled")]
    pub labels: bool,
    #[serde(default = "enabled")]
    pub overlays: bool,
    #[serde(default = "enabled")]
    pub boundaries: bool,
}

fn enabled() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            labels: true,
            overlays: true,
            boundaries: true,
        }
    }
}

/// What the batch driver does when one image fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Stop the batch and return the error.
    #[default]
    Abort,
    /// Log the failure, record it in the report, and continue.
    Skip,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => write!(f, "Abort"),
            Self::Skip => write!(f, "Skip"),
        }
    }
}
