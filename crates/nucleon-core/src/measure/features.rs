use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{NucleonError, Result};

/// Measurements for one nucleus. Field order is the CSV column order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    /// Label value in the image's label image.
    pub label: u32,
    /// Pixel count.
    pub area: usize,
    /// Mean of the background-corrected intensity over the region.
    pub mean_intensity: f64,
    /// `area * mean_intensity`.
    pub integrated_intensity: f64,
    /// Stem of the source image file.
    pub image_id: String,
}

/// Ordered per-nucleus measurements, for one image or a whole batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementTable {
    rows: Vec<MeasurementRow>,
}

impl MeasurementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate tables in order.
    pub fn concat<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = MeasurementTable>,
    {
        let mut rows = Vec::new();
        for table in tables {
            rows.extend(table.rows);
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeasurementRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<MeasurementRow>> for MeasurementTable {
    fn from(rows: Vec<MeasurementRow>) -> Self {
        Self { rows }
    }
}

impl<'a> IntoIterator for &'a MeasurementTable {
    type Item = &'a MeasurementRow;
    type IntoIter = std::slice::Iter<'a, MeasurementRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Measure every labeled region against the corrected intensity image.
///
/// Rows come out in ascending label order. Label values that do not occur
/// produce no row, so an image without nuclei yields an empty table.
pub fn extract_features(
    labels: &Array2<u32>,
    corrected: &Array2<f64>,
    image_id: &str,
) -> Result<MeasurementTable> {
    if labels.dim() != corrected.dim() {
        return Err(NucleonError::ShapeMismatch {
            expected: labels.dim(),
            actual: corrected.dim(),
        });
    }

    // label -> (pixel count, intensity sum)
    let mut regions = BTreeMap::<u32, (usize, f64)>::new();
    for (&lbl, &value) in labels.iter().zip(corrected.iter()) {
        if lbl == 0 {
            continue;
        }
        let entry = regions.entry(lbl).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += value;
    }

    let rows = regions
        .into_iter()
        .map(|(label, (area, sum))| {
            let mean_intensity = sum / area as f64;
            MeasurementRow {
                label,
                area,
                mean_intensity,
                integrated_intensity: area as f64 * mean_intensity,
                image_id: image_id.to_string(),
            }
        })
        .collect::<Vec<_>>();

    Ok(MeasurementTable::from(rows))
}
