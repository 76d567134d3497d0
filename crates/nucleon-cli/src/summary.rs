use console::Style;
use nucleon_core::measure::{HistogramBin, ImageQcFlag, MeasurementSummary};
use nucleon_core::pipeline::config::PipelineConfig;
use nucleon_core::pipeline::BatchReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    warning: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            warning: Style::new().yellow().bold(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    let underline = "\u{2550}".repeat(title.chars().count());
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to(underline));
    println!();
}

fn on_off(s: &Styles, enabled: bool) -> String {
    if enabled {
        s.method.apply_to("yes").to_string()
    } else {
        s.disabled.apply_to("no").to_string()
    }
}

pub fn print_run_summary(config: &PipelineConfig) {
    let s = Styles::new();
    print_title(&s, "Nucleon Pipeline");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("On error"),
        s.method.apply_to(config.on_error)
    );
    println!();

    let seg = &config.segmentation;
    println!("  {}", s.header.apply_to("Segmentation"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min size"),
        s.value.apply_to(format!("{} px", seg.min_nucleus_size))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Neighbors"),
        s.method.apply_to(seg.connectivity)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.method.apply_to(format!("Otsu, applied to {}", seg.threshold_reference))
    );
    println!();

    println!("  {}", s.header.apply_to("Outputs"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Labels"),
        on_off(&s, config.outputs.labels)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Overlays"),
        on_off(&s, config.outputs.overlays)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Boundaries"),
        on_off(&s, config.outputs.boundaries)
    );
    println!();
}

pub fn print_batch_result(report: &BatchReport) {
    let s = Styles::new();

    match report.measurements_path {
        Some(ref path) => println!(
            "\nSaved measurements for {} nuclei to {}",
            s.value.apply_to(report.total_nuclei()),
            s.path.apply_to(path.display())
        ),
        None => println!("\nNo images processed. No measurements saved."),
    }

    if !report.failures.is_empty() {
        let heading = format!("{} image(s) skipped:", report.failures.len());
        println!("\n{}", s.warning.apply_to(heading));
        for failure in &report.failures {
            println!(
                "  {:<24}{}",
                failure.image_id,
                s.disabled.apply_to(&failure.message)
            );
        }
    }
}

pub fn print_measurement_summary(summary: &MeasurementSummary) {
    let s = Styles::new();
    print_title(&s, "Measurement Summary");

    let fmt_f = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
    let fmt_u = |v: Option<usize>| v.map_or_else(|| "n/a".to_string(), |v| v.to_string());

    let rows = [
        ("Nuclei", summary.num_nuclei.to_string()),
        ("Mean area", fmt_f(summary.mean_area)),
        ("Median area", fmt_f(summary.median_area)),
        ("Min area", fmt_u(summary.min_area)),
        ("Max area", fmt_u(summary.max_area)),
        ("Mean int.", fmt_f(summary.mean_intensity)),
    ];
    for (label, value) in rows {
        println!(
            "  {:<14}{}",
            s.label.apply_to(label),
            s.value.apply_to(value)
        );
    }
    println!();
}

pub fn print_qc_flags(flags: &[ImageQcFlag]) {
    let s = Styles::new();
    println!("  {}", s.header.apply_to("Quality Control"));
    if flags.is_empty() {
        println!("    {}", s.method.apply_to("all images within bounds"));
    }
    for flag in flags {
        println!(
            "    {:<24}{} ({})",
            flag.image_id,
            s.warning.apply_to(flag.flag),
            flag.count
        );
    }
    println!();
}

/// Text rendition of the area histogram, one row per non-empty bin.
pub fn print_area_histogram(bins: &[HistogramBin], width: usize) {
    let s = Styles::new();
    println!(
        "  {}",
        s.header.apply_to("Nucleus Area Distribution (pixels)")
    );

    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
    if max_count == 0 {
        println!("    {}", s.disabled.apply_to("no nuclei"));
        println!();
        return;
    }

    for bin in bins.iter().filter(|b| b.count > 0) {
        let bar_len = (bin.count * width).div_ceil(max_count);
        println!(
            "    {:>9.1} - {:<9.1} {} {}",
            bin.lower,
            bin.upper,
            s.method.apply_to("\u{2588}".repeat(bar_len)),
            s.label.apply_to(bin.count)
        );
    }
    println!();
}
