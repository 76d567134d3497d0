use thiserror::Error;

#[derive(Error, Debug)]
pub enum NucleonError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("TIFF error: {0}")]
    TiffError(#[from] tiff::TiffError),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot error: {0}")]
    PlotError(String),

    #[error("Failed to process {image_id}: {source}")]
    ImageFailed {
        image_id: String,
        #[source]
        source: Box<NucleonError>,
    },
}

pub type Result<T> = std::result::Result<T, NucleonError>;
