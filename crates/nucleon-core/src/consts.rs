/// Minimum pixel count (h*w) to use Rayon data-parallelism inside one image.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default minimum nucleus size in pixels. Smaller components are treated as debris.
pub const DEFAULT_MIN_NUCLEUS_SIZE: i64 = 100;

/// Number of histogram bins for Otsu's thresholding.
pub const OTSU_HISTOGRAM_BINS: usize = 256;

/// Opacity of label colors blended over the normalized raw image in overlays.
pub const OVERLAY_ALPHA: f32 = 0.3;

/// Added to the intensity range when normalizing for display, so a constant
/// image maps to zero instead of dividing by zero.
pub const NORMALIZATION_EPSILON: f64 = 1e-8;

/// Hue step between consecutive label colors, in degrees (golden angle).
pub const LABEL_HUE_STEP_DEGREES: f32 = 137.507_77;

/// Saturation and lightness shared by all label colors.
pub const LABEL_SATURATION: f32 = 0.9;
pub const LABEL_LIGHTNESS: f32 = 0.5;

/// Images with fewer nuclei than this are flagged by per-image QC.
pub const DEFAULT_QC_MIN_NUCLEI: usize = 5;

/// Images with more nuclei than this are flagged by per-image QC.
pub const DEFAULT_QC_MAX_NUCLEI: usize = 5000;

/// Number of bins in the nucleus area histogram.
pub const DEFAULT_AREA_HISTOGRAM_BINS: usize = 50;

/// Pixel size (width, height) of the area histogram plot.
pub const AREA_HISTOGRAM_PLOT_SIZE: (u32, u32) = (800, 600);

/// Output subdirectory for 32-bit label images.
pub const LABELS_DIR: &str = "labels";

/// Output subdirectory for colorized overlay PNGs.
pub const OVERLAYS_DIR: &str = "overlays";

/// Output subdirectory for boundary PNGs.
pub const BOUNDARIES_DIR: &str = "boundaries";

/// File name of the aggregated per-nucleus measurement table.
pub const MEASUREMENTS_FILE_NAME: &str = "nucleus_measurements.csv";

/// Column order of the measurement CSV.
pub const MEASUREMENT_COLUMNS: [&str; 5] = [
    "label",
    "area",
    "mean_intensity",
    "integrated_intensity",
    "image_id",
];
