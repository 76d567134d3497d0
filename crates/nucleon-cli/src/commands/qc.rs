use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use nucleon_core::consts::{
    DEFAULT_AREA_HISTOGRAM_BINS, DEFAULT_QC_MAX_NUCLEI, DEFAULT_QC_MIN_NUCLEI,
};
use nucleon_core::io::read_measurements;
use nucleon_core::measure::{area_histogram, nuclei_counts, per_image_qc, summarize, QcConfig};
use nucleon_core::visualize::plot_area_histogram;

use crate::summary::{print_area_histogram, print_measurement_summary, print_qc_flags};

#[derive(Args)]
pub struct QcArgs {
    /// Measurement CSV written by `nucleon run`
    pub file: PathBuf,

    /// Flag images with fewer nuclei than this
    #[arg(long, default_value_t = DEFAULT_QC_MIN_NUCLEI)]
    pub min_nuclei: usize,

    /// Flag images with more nuclei than this
    #[arg(long, default_value_t = DEFAULT_QC_MAX_NUCLEI)]
    pub max_nuclei: usize,

    /// Number of bins in the area histogram
    #[arg(long, default_value_t = DEFAULT_AREA_HISTOGRAM_BINS)]
    pub bins: usize,

    /// Also save the area histogram as an image (e.g. area_histogram.png)
    #[arg(long)]
    pub plot: Option<PathBuf>,
}

pub fn run(args: &QcArgs) -> Result<()> {
    let table = read_measurements(&args.file)
        .with_context(|| format!("Failed to read measurements {}", args.file.display()))?;

    print_measurement_summary(&summarize(&table));

    let qc = QcConfig {
        min_nuclei: args.min_nuclei,
        max_nuclei: args.max_nuclei,
    };
    print_qc_flags(&per_image_qc(&nuclei_counts(&table), &qc));

    let histogram = area_histogram(&table, args.bins);
    print_area_histogram(&histogram, 40);

    if let Some(ref path) = args.plot {
        plot_area_histogram(&histogram, path)
            .with_context(|| format!("Failed to save area histogram to {}", path.display()))?;
        println!("Area histogram saved to {}", path.display());
    }

    Ok(())
}
