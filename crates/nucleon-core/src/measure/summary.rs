use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_QC_MAX_NUCLEI, DEFAULT_QC_MIN_NUCLEI};

use super::features::MeasurementTable;

/// Dataset-level statistics. Fields are `None` when there are no nuclei.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementSummary {
    pub num_nuclei: usize,
    pub mean_area: Option<f64>,
    pub median_area: Option<f64>,
    pub min_area: Option<usize>,
    pub max_area: Option<usize>,
    /// Mean of the per-nucleus mean intensities.
    pub mean_intensity: Option<f64>,
}

pub fn summarize(table: &MeasurementTable) -> MeasurementSummary {
    let n = table.len();
    if n == 0 {
        return MeasurementSummary {
            num_nuclei: 0,
            mean_area: None,
            median_area: None,
            min_area: None,
            max_area: None,
            mean_intensity: None,
        };
    }

    let mut areas: Vec<usize> = table.iter().map(|r| r.area).collect();
    areas.sort_unstable();

    let mean_area = areas.iter().map(|&a| a as f64).sum::<f64>() / n as f64;
    let median_area = if n % 2 == 1 {
        areas[n / 2] as f64
    } else {
        (areas[n / 2 - 1] + areas[n / 2]) as f64 / 2.0
    };
    let mean_intensity = table.iter().map(|r| r.mean_intensity).sum::<f64>() / n as f64;

    MeasurementSummary {
        num_nuclei: n,
        mean_area: Some(mean_area),
        median_area: Some(median_area),
        min_area: areas.first().copied(),
        max_area: areas.last().copied(),
        mean_intensity: Some(mean_intensity),
    }
}

/// Nucleus count bounds for per-image quality control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QcConfig {
    #[serde(default = "default_min_nuclei")]
    pub min_nuclei: usize,
    #[serde(default = "default_max_nuclei")]
    pub max_nuclei: usize,
}

fn default_min_nuclei() -> usize {
    DEFAULT_QC_MIN_NUCLEI
}
fn default_max_nuclei() -> usize {
    DEFAULT_QC_MAX_NUCLEI
}

impl Default for QcConfig {
    fn default() -> Self {
        Self {
            min_nuclei: DEFAULT_QC_MIN_NUCLEI,
            max_nuclei: DEFAULT_QC_MAX_NUCLEI,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QcFlag {
    TooFew,
    TooMany,
}

impl std::fmt::Display for QcFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFew => write!(f, "Too few nuclei"),
            Self::TooMany => write!(f, "Too many nuclei"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageQcFlag {
    pub image_id: String,
    pub count: usize,
    pub flag: QcFlag,
}

/// Number of nuclei per image, sorted by image id.
///
/// Images with zero nuclei have no rows and therefore do not appear here;
/// the batch report carries those counts.
pub fn nuclei_counts(table: &MeasurementTable) -> Vec<(String, usize)> {
    let mut counts = BTreeMap::<&str, usize>::new();
    for row in table {
        *counts.entry(row.image_id.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(id, count)| (id.to_string(), count))
        .collect()
}

/// Flag images whose nucleus count falls outside `[min_nuclei, max_nuclei]`.
pub fn per_image_qc(counts: &[(String, usize)], config: &QcConfig) -> Vec<ImageQcFlag> {
    counts
        .iter()
        .filter_map(|(image_id, count)| {
            let flag = if *count < config.min_nuclei {
                QcFlag::TooFew
            } else if *count > config.max_nuclei {
                QcFlag::TooMany
            } else {
                return None;
            };
            Some(ImageQcFlag {
                image_id: image_id.clone(),
                count: *count,
                flag,
            })
        })
        .collect()
}

/// One bar of the area histogram, covering `[lower, upper)`
/// (the last bin also includes `upper`).
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Histogram of nucleus areas with `bins` equal-width bins spanning the
/// observed range. A single distinct area gets a unit-wide range centred on it.
pub fn area_histogram(table: &MeasurementTable, bins: usize) -> Vec<HistogramBin> {
    if table.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = table
        .iter()
        .map(|r| r.area as f64)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), a| {
            (lo.min(a), hi.max(a))
        });
    if hi <= lo {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for row in table {
        let bin = (((row.area as f64 - lo) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + i as f64 * width,
            upper: lo + (i + 1) as f64 * width,
            count,
        })
        .collect()
}
