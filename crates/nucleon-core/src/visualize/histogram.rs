use std::path::Path;

use plotters::prelude::*;

use crate::consts::AREA_HISTOGRAM_PLOT_SIZE;
use crate::error::{NucleonError, Result};
use crate::measure::HistogramBin;

/// Draw the nucleus area histogram as a bar chart and save it as an image.
///
/// The output format follows the file extension. Bars are outlined so that
/// adjacent bins stay distinguishable; an empty histogram still produces a
/// blank chart with axes.
pub fn plot_area_histogram(bins: &[HistogramBin], path: &Path) -> Result<()> {
    let backend = BitMapBackend::new(path, AREA_HISTOGRAM_PLOT_SIZE);
    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let (x_min, x_max) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.lower, last.upper),
        _ => (0.0, 1.0),
    };
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(plot_error)?;

    chart
        .draw_series(bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                BLUE.mix(0.7).filled(),
            )
        }))
        .map_err(plot_error)?;
    chart
        .draw_series(bins.iter().filter(|b| b.count > 0).map(|bin| {
            Rectangle::new(
                [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                BLACK.stroke_width(1),
            )
        }))
        .map_err(plot_error)?;

    // Axes
    chart
        .draw_series(LineSeries::new(vec![(x_min, 0.0), (x_max, 0.0)], &BLACK))
        .map_err(plot_error)?;
    chart
        .draw_series(LineSeries::new(vec![(x_min, 0.0), (x_min, y_max)], &BLACK))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

fn plot_error<E>(err: DrawingAreaErrorKind<E>) -> NucleonError
where
    E: std::error::Error + Send + Sync,
{
    NucleonError::PlotError(err.to_string())
}
