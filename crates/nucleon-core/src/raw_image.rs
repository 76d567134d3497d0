use ndarray::Array2;

use crate::error::{NucleonError, Result};

/// A single-channel 2D fluorescence image at its original intensity scale.
///
/// Samples are held as f64 regardless of the on-disk precision so that
/// background subtraction never underflows.
#[derive(Clone, Debug)]
pub struct RawImage {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f64>,
    /// Sample type the image was decoded from
    pub sample_format: SampleFormat,
}

impl RawImage {
    /// Wrap pixel data, rejecting empty grids.
    pub fn new(data: Array2<f64>, sample_format: SampleFormat) -> Result<Self> {
        if data.is_empty() {
            let (h, w) = data.dim();
            return Err(NucleonError::InvalidInput(format!(
                "image has no pixels ({w}x{h})"
            )));
        }
        Ok(Self {
            data,
            sample_format,
        })
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Numeric type of the samples in a source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    U8,
    U16,
    U32,
    F32,
    F64,
}

impl SampleFormat {
    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U8 => write!(f, "8-bit unsigned"),
            Self::U16 => write!(f, "16-bit unsigned"),
            Self::U32 => write!(f, "32-bit unsigned"),
            Self::F32 => write!(f, "32-bit float"),
            Self::F64 => write!(f, "64-bit float"),
        }
    }
}
