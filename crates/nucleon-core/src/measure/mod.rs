pub mod features;
pub mod summary;

pub use features::{extract_features, MeasurementRow, MeasurementTable};
pub use summary::{
    area_histogram, nuclei_counts, per_image_qc, summarize, HistogramBin, ImageQcFlag,
    MeasurementSummary, QcConfig, QcFlag,
};
