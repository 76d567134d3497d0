use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use nucleon_core::consts::DEFAULT_MIN_NUCLEUS_SIZE;
use nucleon_core::measure::per_image_qc;
use nucleon_core::pipeline::config::{ErrorPolicy, OutputConfig, PipelineConfig};
use nucleon_core::pipeline::{
    run_batch_reported, BatchReport, ImageFailure, ImageRecord, PipelineStage, ProgressReporter,
};
use nucleon_core::segmentation::{Connectivity, SegmentationConfig, ThresholdReference};
use tracing::info;

use crate::summary::{print_batch_result, print_qc_flags, print_run_summary};

#[derive(Clone, ValueEnum)]
pub enum ConnectivityArg {
    Four,
    Eight,
}

#[derive(Clone, ValueEnum)]
pub enum ThresholdReferenceArg {
    /// Compare the Otsu cut point against unshifted raw pixels
    Raw,
    /// Compare against background-subtracted pixels
    BackgroundSubtracted,
}

#[derive(Args)]
pub struct RunArgs {
    /// Directory containing input TIFF images
    #[arg(long, required_unless_present = "config")]
    pub input_dir: Option<PathBuf>,

    /// Directory to save results
    #[arg(long, required_unless_present = "config")]
    pub output_dir: Option<PathBuf>,

    /// Pipeline config file (TOML); replaces all other options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum size (in pixels) for detected nuclei
    #[arg(
        long,
        default_value_t = DEFAULT_MIN_NUCLEUS_SIZE,
        allow_negative_numbers = true
    )]
    pub min_nucleus_size: i64,

    /// Pixel connectivity for cleanup and labeling
    #[arg(long, value_enum, default_value = "eight")]
    pub connectivity: ConnectivityArg,

    /// Pixel values the Otsu threshold is applied to
    #[arg(long, value_enum, default_value = "raw")]
    pub threshold_reference: ThresholdReferenceArg,

    /// Skip images that fail instead of aborting the batch
    #[arg(long)]
    pub skip_failures: bool,

    /// Do not write label TIFFs
    #[arg(long)]
    pub no_labels: bool,

    /// Do not write overlay PNGs
    #[arg(long)]
    pub no_overlays: bool,

    /// Do not write boundary PNGs
    #[arg(long)]
    pub no_boundaries: bool,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        let config: PipelineConfig = toml::from_str(&contents)
            .context("Invalid pipeline config")?;
        info!(path = %config_path.display(), "Loaded pipeline config");
        config
    } else {
        build_config_from_args(args)?
    };

    print_run_summary(&config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = Arc::new(BarReporter { bar: pb });

    let report = run_batch_reported(&config, reporter).with_context(|| {
        format!(
            "Pipeline failed for input directory {}",
            config.input_dir.display()
        )
    })?;

    print_batch_result(&report);
    if !report.images.is_empty() {
        print_qc_flags(&per_image_qc(&report.nuclei_counts(), &config.qc));
    }
    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> Result<PipelineConfig> {
    let input_dir = args
        .input_dir
        .clone()
        .context("--input-dir is required without --config")?;
    let output_dir = args
        .output_dir
        .clone()
        .context("--output-dir is required without --config")?;

    let connectivity = match args.connectivity {
        ConnectivityArg::Four => Connectivity::Four,
        ConnectivityArg::Eight => Connectivity::Eight,
    };
    let threshold_reference = match args.threshold_reference {
        ThresholdReferenceArg::Raw => ThresholdReference::Raw,
        ThresholdReferenceArg::BackgroundSubtracted => ThresholdReference::BackgroundSubtracted,
    };

    let mut config = PipelineConfig::new(input_dir, output_dir);
    config.segmentation = SegmentationConfig {
        min_nucleus_size: args.min_nucleus_size,
        connectivity,
        threshold_reference,
    };
    config.outputs = OutputConfig {
        labels: !args.no_labels,
        overlays: !args.no_overlays,
        boundaries: !args.no_boundaries,
    };
    if args.skip_failures {
        config.on_error = ErrorPolicy::Skip;
    }
    Ok(config)
}

/// Drives an indicatif bar from batch progress events.
struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_batch(&self, total_images: usize) {
        self.bar.set_length(total_images as u64);
    }

    fn begin_image(&self, _index: usize, image_id: &str) {
        self.bar.println(format!("Processing {image_id}..."));
    }

    fn begin_stage(&self, stage: PipelineStage) {
        self.bar.set_message(stage.to_string());
    }

    fn finish_image(&self, _record: &ImageRecord) {
        self.bar.inc(1);
    }

    fn skip_image(&self, failure: &ImageFailure) {
        self.bar
            .println(format!("Skipped {}: {}", failure.image_id, failure.message));
        self.bar.inc(1);
    }

    fn finish_batch(&self, _report: &BatchReport) {
        self.bar.finish_with_message("Done");
    }
}
