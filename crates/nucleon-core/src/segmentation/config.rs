use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MIN_NUCLEUS_SIZE;
use crate::error::{NucleonError, Result};

/// Pixel neighborhood shared by small-object removal, hole filling and labeling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    /// Edge neighbors only (up, down, left, right).
    Four,
    /// Edge and corner neighbors.
    #[default]
    Eight,
}

const FOUR_PRECEDING: [(isize, isize); 2] = [(-1, 0), (0, -1)];
const EIGHT_PRECEDING: [(isize, isize); 4] = [(-1, -1), (-1, 0), (-1, 1), (0, -1)];
const FOUR_NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
const EIGHT_NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Connectivity {
    /// All neighbor offsets as (d_row, d_col).
    pub fn neighbors(&self) -> &'static [(isize, isize)] {
        match self {
            Self::Four => &FOUR_NEIGHBORS,
            Self::Eight => &EIGHT_NEIGHBORS,
        }
    }

    /// Neighbors already visited in a row-major raster scan.
    pub fn preceding_neighbors(&self) -> &'static [(isize, isize)] {
        match self {
            Self::Four => &FOUR_PRECEDING,
            Self::Eight => &EIGHT_PRECEDING,
        }
    }

    /// Connectivity used for the background when this one is used for the
    /// foreground. Pairing them keeps closed outlines closed.
    pub fn complement(&self) -> Self {
        match self {
            Self::Four => Self::Eight,
            Self::Eight => Self::Four,
        }
    }
}

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Four => write!(f, "4-connected"),
            Self::Eight => write!(f, "8-connected"),
        }
    }
}

/// Which pixel values the Otsu cut point is compared against.
///
/// The threshold is always selected on the histogram of `raw - background`.
/// `Raw` then compares it to the unshifted raw values, which reproduces the
/// behaviour of earlier releases of this pipeline. `BackgroundSubtracted`
/// compares in the same shifted space the threshold was chosen in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdReference {
    #[default]
    Raw,
    BackgroundSubtracted,
}

impl std::fmt::Display for ThresholdReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "Raw"),
            Self::BackgroundSubtracted => write!(f, "Background-subtracted"),
        }
    }
}

/// Parameters of the foreground segmentation and instance labeling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Components with fewer pixels than this are removed. Must be >= 0.
    #[serde(default = "default_min_nucleus_size")]
    pub min_nucleus_size: i64,
    #[serde(default)]
    pub connectivity: Connectivity,
    #[serde(default)]
    pub threshold_reference: ThresholdReference,
}

fn default_min_nucleus_size() -> i64 {
    DEFAULT_MIN_NUCLEUS_SIZE
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_nucleus_size: DEFAULT_MIN_NUCLEUS_SIZE,
            connectivity: Connectivity::default(),
            threshold_reference: ThresholdReference::default(),
        }
    }
}

impl SegmentationConfig {
    pub fn with_min_nucleus_size(min_nucleus_size: i64) -> Self {
        Self {
            min_nucleus_size,
            ..Default::default()
        }
    }

    /// Validated minimum object size in pixels.
    pub fn min_object_size(&self) -> Result<usize> {
        usize::try_from(self.min_nucleus_size).map_err(|_| {
            NucleonError::InvalidInput(format!(
                "min_nucleus_size must be non-negative, got {}",
                self.min_nucleus_size
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.min_object_size().map(|_| ())
    }
}
