use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{NucleonError, Result};
use crate::io::{load_raw_image, save_label_tiff, save_rgb_png, write_measurements};
use crate::measure::{extract_features, MeasurementTable};
use crate::raw_image::RawImage;
use crate::segmentation::{
    correct_background, label_components, segment_foreground, SegmentationConfig,
};
use crate::visualize::{render_boundaries, render_overlay};

use super::config::{ErrorPolicy, PipelineConfig};
use super::layout::OutputLayout;
use super::types::{
    BatchReport, ImageAnalysis, ImageFailure, ImageRecord, NoOpReporter, PipelineStage,
    ProgressReporter,
};

/// List `*.tif` / `*.tiff` files (case-insensitive) directly inside `dir`,
/// sorted by path.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_tiff = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"));
        if is_tiff {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Image identifier: the file name without its extension.
pub fn image_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Run the segmentation and measurement core on one in-memory image.
///
/// raw -> background correction -> foreground mask -> labels -> measurements.
pub fn analyze_image(
    raw: &RawImage,
    image_id: &str,
    config: &SegmentationConfig,
) -> Result<ImageAnalysis> {
    analyze_reported(raw, image_id, config, &NoOpReporter)
}

fn analyze_reported(
    raw: &RawImage,
    image_id: &str,
    config: &SegmentationConfig,
    reporter: &dyn ProgressReporter,
) -> Result<ImageAnalysis> {
    reporter.begin_stage(PipelineStage::BackgroundCorrection);
    let background = correct_background(&raw.data)?;

    reporter.begin_stage(PipelineStage::Segmentation);
    let mask = segment_foreground(&raw.data, background.level, config)?;

    reporter.begin_stage(PipelineStage::Labeling);
    let labels = label_components(&mask, config.connectivity);

    reporter.begin_stage(PipelineStage::Measuring);
    let measurements = extract_features(&labels.data, &background.corrected, image_id)?;

    debug!(
        image_id,
        background = background.level,
        nuclei = labels.count,
        "Image analyzed"
    );

    Ok(ImageAnalysis {
        image_id: image_id.to_string(),
        background_level: background.level,
        corrected: background.corrected,
        labels,
        measurements,
    })
}

/// Load, analyze, and write the per-image artifacts for one file.
///
/// `layout` must already be prepared.
pub fn process_image(
    path: &Path,
    config: &PipelineConfig,
    layout: &OutputLayout,
    reporter: &dyn ProgressReporter,
) -> Result<ImageAnalysis> {
    let image_id = image_id_for(path);

    reporter.begin_stage(PipelineStage::Loading);
    let raw = load_raw_image(path)?;
    debug!(
        image_id = %image_id,
        width = raw.width(),
        height = raw.height(),
        format = %raw.sample_format,
        "Image loaded"
    );

    let analysis = analyze_reported(&raw, &image_id, &config.segmentation, reporter)?;

    if config.outputs.overlays || config.outputs.boundaries {
        reporter.begin_stage(PipelineStage::Rendering);
    }
    if config.outputs.overlays {
        let overlay = render_overlay(&raw.data, &analysis.labels.data)?;
        save_rgb_png(&overlay, &layout.overlay_path(&image_id))?;
    }
    if config.outputs.boundaries {
        let boundaries = render_boundaries(&raw.data, &analysis.labels.data)?;
        save_rgb_png(&boundaries, &layout.boundary_path(&image_id))?;
    }

    if config.outputs.labels {
        reporter.begin_stage(PipelineStage::Writing);
        save_label_tiff(&analysis.labels.data, &layout.label_path(&image_id))?;
    }

    Ok(analysis)
}

/// Process every image in the input directory and write the aggregated CSV.
pub fn run_batch_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<BatchReport> {
    config.segmentation.validate()?;

    let paths = discover_images(&config.input_dir)?;
    info!(
        images = paths.len(),
        input = %config.input_dir.display(),
        min_nucleus_size = config.segmentation.min_nucleus_size,
        connectivity = %config.segmentation.connectivity,
        threshold_reference = %config.segmentation.threshold_reference,
        "Starting batch"
    );

    let layout = OutputLayout::new(&config.output_dir);
    layout.prepare(&config.outputs)?;

    reporter.begin_batch(paths.len());

    let mut report = BatchReport::default();
    let mut tables = Vec::with_capacity(paths.len());

    for (index, path) in paths.iter().enumerate() {
        let image_id = image_id_for(path);
        reporter.begin_image(index, &image_id);

        match process_image(path, config, &layout, reporter.as_ref()) {
            Ok(analysis) => {
                let record = ImageRecord {
                    image_id: analysis.image_id,
                    source: path.clone(),
                    background_level: analysis.background_level,
                    nuclei: analysis.measurements.len(),
                };
                info!(image_id = %record.image_id, nuclei = record.nuclei, "Image processed");
                reporter.finish_image(&record);
                report.images.push(record);
                tables.push(analysis.measurements);
            }
            Err(err) => match config.on_error {
                ErrorPolicy::Abort => {
                    return Err(NucleonError::ImageFailed {
                        image_id,
                        source: Box::new(err),
                    })
                }
                ErrorPolicy::Skip => {
                    warn!(image_id = %image_id, error = %err, "Skipping image");
                    let failure = ImageFailure {
                        image_id,
                        source: path.clone(),
                        message: err.to_string(),
                    };
                    reporter.skip_image(&failure);
                    report.failures.push(failure);
                }
            },
        }
    }

    report.measurements = MeasurementTable::concat(tables);

    if !report.images.is_empty() {
        let csv_path = layout.measurements_path();
        write_measurements(&report.measurements, &csv_path)?;
        info!(
            nuclei = report.total_nuclei(),
            path = %csv_path.display(),
            "Measurements saved"
        );
        report.measurements_path = Some(csv_path);
    } else {
        info!("No images processed; no measurements saved");
    }

    reporter.finish_batch(&report);
    Ok(report)
}

/// Process every image in the input directory without progress reporting.
pub fn run_batch(config: &PipelineConfig) -> Result<BatchReport> {
    run_batch_reported(config, Arc::new(NoOpReporter))
}
