use approx::assert_relative_eq;
use ndarray::{array, Array2};

use nucleon_core::error::NucleonError;
use nucleon_core::measure::extract_features;

#[test]
fn test_shape_mismatch_is_error() {
    let labels = Array2::<u32>::zeros((4, 4));
    let corrected = Array2::<f64>::zeros((4, 5));
    let result = extract_features(&labels, &corrected, "img");
    assert!(matches!(
        result,
        Err(NucleonError::ShapeMismatch {
            expected: (4, 4),
            actual: (4, 5)
        })
    ));
}

#[test]
fn test_no_labels_gives_empty_table() {
    let labels = Array2::<u32>::zeros((4, 4));
    let corrected = Array2::from_elem((4, 4), 3.0);
    let table = extract_features(&labels, &corrected, "img").unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_area_and_mean_per_label() {
    let labels = array![[1, 1, 0], [0, 2, 2], [0, 2, 0]];
    let corrected = array![[2.0, 4.0, 99.0], [99.0, 1.0, 2.0], [99.0, 6.0, 99.0]];
    let table = extract_features(&labels, &corrected, "sample_01").unwrap();

    assert_eq!(table.len(), 2);
    let rows = table.rows();

    assert_eq!(rows[0].label, 1);
    assert_eq!(rows[0].area, 2);
    assert_relative_eq!(rows[0].mean_intensity, 3.0);
    assert_relative_eq!(rows[0].integrated_intensity, 6.0);

    assert_eq!(rows[1].label, 2);
    assert_eq!(rows[1].area, 3);
    assert_relative_eq!(rows[1].mean_intensity, 3.0);
    assert_relative_eq!(rows[1].integrated_intensity, 9.0);

    assert!(rows.iter().all(|r| r.image_id == "sample_01"));
}

#[test]
fn test_rows_ascending_and_sparse_labels_skipped() {
    let labels = array![[7, 0, 3], [7, 0, 3]];
    let corrected = Array2::from_elem((2, 3), 1.0);
    let table = extract_features(&labels, &corrected, "img").unwrap();
    let ids: Vec<u32> = table.iter().map(|r| r.label).collect();
    assert_eq!(ids, vec![3, 7]);
}

#[test]
fn test_integrated_is_exactly_area_times_mean() {
    let labels = Array2::from_shape_fn((25, 25), |(r, c)| ((r / 5) * 5 + c / 5) as u32 % 7);
    let corrected = Array2::from_shape_fn((25, 25), |(r, c)| {
        ((r * 37 + c * 11) % 101) as f64 / 3.0 + 0.1
    });
    let table = extract_features(&labels, &corrected, "img").unwrap();
    assert!(!table.is_empty());
    for row in &table {
        assert_eq!(row.integrated_intensity, row.area as f64 * row.mean_intensity);
    }
}

#[test]
fn test_total_area_equals_labeled_pixels() {
    let labels = Array2::from_shape_fn((10, 10), |(r, c)| match (r, c) {
        (0..=2, _) => 1,
        (_, c) if c > 6 => 2,
        _ => 0,
    });
    let corrected = Array2::<f64>::zeros((10, 10));
    let table = extract_features(&labels, &corrected, "img").unwrap();
    let total: usize = table.iter().map(|r| r.area).sum();
    assert_eq!(total, labels.iter().filter(|&&l| l > 0).count());
}
