use image::Rgb;
use ndarray::{array, Array2};

use nucleon_core::consts::AREA_HISTOGRAM_PLOT_SIZE;
use nucleon_core::error::NucleonError;
use nucleon_core::measure::{area_histogram, MeasurementRow, MeasurementTable};
use nucleon_core::visualize::{
    find_outer_boundaries, label_color, normalize_for_display, plot_area_histogram,
    render_boundaries, render_overlay,
};

mod common;

fn square_labels() -> Array2<u32> {
    let mut labels = Array2::<u32>::zeros((7, 7));
    for row in 2..5 {
        for col in 2..5 {
            labels[[row, col]] = 1;
        }
    }
    labels
}

#[test]
fn test_normalize_spans_unit_range() {
    let data = array![[10.0, 20.0], [30.0, 110.0]];
    let norm = normalize_for_display(&data);
    assert_eq!(norm[[0, 0]], 0.0);
    assert!((norm[[1, 1]] - 1.0).abs() < 1e-6);
    assert!((norm[[0, 1]] - 0.1).abs() < 1e-6);
}

#[test]
fn test_normalize_constant_image_is_zero() {
    let norm = normalize_for_display(&Array2::from_elem((3, 3), 5.0));
    assert!(norm.iter().all(|&v| v == 0.0));
}

#[test]
fn test_outer_boundary_rings_region() {
    let boundaries = find_outer_boundaries(&square_labels());
    // Three pixels on each side of the square, corners excluded.
    assert_eq!(common::count_true(&boundaries), 12);
    assert!(boundaries[[1, 2]]);
    assert!(boundaries[[3, 5]]);
    assert!(!boundaries[[1, 1]]);
    assert!(!boundaries[[3, 3]]);
    assert!(!boundaries[[2, 2]]);
}

#[test]
fn test_touching_regions_mark_contact() {
    let labels = array![[1, 2], [1, 2]];
    let boundaries = find_outer_boundaries(&labels);
    assert!(boundaries.iter().all(|&b| b));
}

#[test]
fn test_render_boundaries_paints_white() {
    let raw = Array2::from_shape_fn((7, 7), |(r, c)| (r * 7 + c) as f64);
    let img = render_boundaries(&raw, &square_labels()).unwrap();
    assert_eq!(img.dimensions(), (7, 7));
    // image coordinates are (x = col, y = row)
    assert_eq!(*img.get_pixel(2, 1), Rgb([255, 255, 255]));
    assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
    let p = img.get_pixel(3, 3);
    assert_eq!(p[0], p[1]);
    assert_eq!(p[1], p[2]);
}

#[test]
fn test_overlay_keeps_background_gray_and_tints_labels() {
    let raw = Array2::from_elem((7, 7), 0.0);
    let img = render_overlay(&raw, &square_labels()).unwrap();

    assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));

    let [r, g, b] = label_color(1);
    let expected = Rgb([
        (r * 0.3 * 255.0).round() as u8,
        (g * 0.3 * 255.0).round() as u8,
        (b * 0.3 * 255.0).round() as u8,
    ]);
    assert_eq!(*img.get_pixel(3, 3), expected);
}

#[test]
fn test_render_shape_mismatch() {
    let raw = Array2::<f64>::zeros((4, 4));
    let labels = Array2::<u32>::zeros((4, 3));
    assert!(matches!(
        render_overlay(&raw, &labels),
        Err(NucleonError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        render_boundaries(&raw, &labels),
        Err(NucleonError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_large_render_dimensions() {
    let raw = Array2::from_shape_fn((300, 260), |(r, c)| (r + c) as f64);
    let labels = Array2::<u32>::zeros((300, 260));
    let img = render_overlay(&raw, &labels).unwrap();
    assert_eq!(img.dimensions(), (260, 300));
    assert_eq!(*img.get_pixel(259, 299), Rgb([255, 255, 255]));
}

// ---------------------------------------------------------------------------
// Area histogram plot
// ---------------------------------------------------------------------------

fn area_table(areas: &[usize]) -> MeasurementTable {
    MeasurementTable::from(
        areas
            .iter()
            .enumerate()
            .map(|(i, &area)| MeasurementRow {
                label: i as u32 + 1,
                area,
                mean_intensity: 1.0,
                integrated_intensity: area as f64,
                image_id: "img".to_string(),
            })
            .collect::<Vec<_>>(),
    )
}

#[test]
fn test_area_histogram_plot_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("area_histogram.png");
    let bins = area_histogram(&area_table(&[120, 150, 150, 400, 90]), 50);

    plot_area_histogram(&bins, &path).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), AREA_HISTOGRAM_PLOT_SIZE);
    // Background is white and the bars add some non-white pixels.
    let rgb = img.to_rgb8();
    assert_eq!(*rgb.get_pixel(0, 0), Rgb([255, 255, 255]));
    assert!(rgb.pixels().any(|p| *p != Rgb([255, 255, 255])));
}

#[test]
fn test_area_histogram_plot_of_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.png");
    let bins = area_histogram(&MeasurementTable::new(), 50);

    plot_area_histogram(&bins, &path).unwrap();
    assert!(path.is_file());
}

#[test]
fn test_area_histogram_plot_bad_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("plot.png");
    let bins = area_histogram(&area_table(&[10, 20]), 5);

    assert!(matches!(
        plot_area_histogram(&bins, &path),
        Err(NucleonError::PlotError(_))
    ));
}
