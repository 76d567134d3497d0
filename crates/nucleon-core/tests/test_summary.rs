use approx::assert_relative_eq;

use nucleon_core::measure::{
    area_histogram, nuclei_counts, per_image_qc, summarize, MeasurementRow, MeasurementTable,
    QcConfig, QcFlag,
};

fn row(label: u32, area: usize, mean: f64, image_id: &str) -> MeasurementRow {
    MeasurementRow {
        label,
        area,
        mean_intensity: mean,
        integrated_intensity: area as f64 * mean,
        image_id: image_id.to_string(),
    }
}

fn sample_table() -> MeasurementTable {
    MeasurementTable::from(vec![
        row(1, 9, 100.0, "b"),
        row(2, 1, 50.0, "b"),
        row(1, 4, 30.0, "a"),
        row(2, 10, 20.0, "a"),
    ])
}

#[test]
fn test_summary_statistics() {
    let summary = summarize(&sample_table());
    assert_eq!(summary.num_nuclei, 4);
    assert_relative_eq!(summary.mean_area.unwrap(), 6.0);
    assert_relative_eq!(summary.median_area.unwrap(), 6.5);
    assert_eq!(summary.min_area, Some(1));
    assert_eq!(summary.max_area, Some(10));
    assert_relative_eq!(summary.mean_intensity.unwrap(), 50.0);
}

#[test]
fn test_summary_of_empty_table() {
    let summary = summarize(&MeasurementTable::new());
    assert_eq!(summary.num_nuclei, 0);
    assert!(summary.mean_area.is_none());
    assert!(summary.median_area.is_none());
    assert!(summary.min_area.is_none());
    assert!(summary.max_area.is_none());
    assert!(summary.mean_intensity.is_none());
}

#[test]
fn test_nuclei_counts_sorted_by_image() {
    assert_eq!(
        nuclei_counts(&sample_table()),
        vec![("a".to_string(), 2), ("b".to_string(), 2)]
    );
}

#[test]
fn test_qc_flags_outside_bounds() {
    let counts = vec![
        ("few".to_string(), 2),
        ("ok".to_string(), 40),
        ("many".to_string(), 6000),
        ("none".to_string(), 0),
    ];
    let flags = per_image_qc(&counts, &QcConfig::default());

    assert_eq!(flags.len(), 3);
    assert_eq!(flags[0].image_id, "few");
    assert_eq!(flags[0].flag, QcFlag::TooFew);
    assert_eq!(flags[1].image_id, "many");
    assert_eq!(flags[1].flag, QcFlag::TooMany);
    assert_eq!(flags[2].image_id, "none");
    assert_eq!(flags[2].count, 0);
}

#[test]
fn test_qc_bounds_are_inclusive() {
    let counts = vec![("low".to_string(), 5), ("high".to_string(), 5000)];
    assert!(per_image_qc(&counts, &QcConfig::default()).is_empty());
}

#[test]
fn test_qc_flag_display() {
    assert_eq!(format!("{}", QcFlag::TooFew), "Too few nuclei");
    assert_eq!(format!("{}", QcFlag::TooMany), "Too many nuclei");
}

#[test]
fn test_area_histogram_counts_every_nucleus() {
    let bins = area_histogram(&sample_table(), 3);
    assert_eq!(bins.len(), 3);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
    assert_relative_eq!(bins[0].lower, 1.0);
    assert_relative_eq!(bins[2].upper, 10.0);
    // Bins are [1, 4), [4, 7) and [7, 10]; the last one is closed.
    assert_eq!(bins[0].count, 1);
    assert_eq!(bins[1].count, 1);
    assert_eq!(bins[2].count, 2);
}

#[test]
fn test_area_histogram_single_value() {
    let table = MeasurementTable::from(vec![row(1, 7, 1.0, "a"), row(2, 7, 1.0, "a")]);
    let bins = area_histogram(&table, 4);
    assert_relative_eq!(bins[0].lower, 6.5);
    assert_relative_eq!(bins[3].upper, 7.5);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
}

#[test]
fn test_area_histogram_empty() {
    assert!(area_histogram(&MeasurementTable::new(), 10).is_empty());
}

#[test]
fn test_concat_preserves_order() {
    let a = MeasurementTable::from(vec![row(1, 1, 1.0, "a")]);
    let b = MeasurementTable::new();
    let c = MeasurementTable::from(vec![row(1, 2, 1.0, "c"), row(2, 3, 1.0, "c")]);
    let all = MeasurementTable::concat([a, b, c]);
    let ids: Vec<&str> = all.iter().map(|r| r.image_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "c"]);
}
