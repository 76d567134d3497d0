use ndarray::Array2;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{NucleonError, Result};

/// Scalar background estimate and the background-subtracted image.
#[derive(Clone, Debug)]
pub struct BackgroundCorrection {
    /// Median of the raw image.
    pub level: f64,
    /// `max(raw - level, 0)`, same shape as the raw image.
    pub corrected: Array2<f64>,
}

/// Subtract the global median from every pixel, clipping at zero.
pub fn correct_background(raw: &Array2<f64>) -> Result<BackgroundCorrection> {
    let level = median(raw)?;

    let corrected = if raw.len() >= PARALLEL_PIXEL_THRESHOLD {
        let mut corrected = raw.to_owned();
        corrected.par_mapv_inplace(|v| (v - level).max(0.0));
        corrected
    } else {
        raw.mapv(|v| (v - level).max(0.0))
    };

    Ok(BackgroundCorrection { level, corrected })
}

/// Median of all samples. Even counts average the two middle values.
///
/// Uses `select_nth_unstable_by` for O(n) selection without a full sort.
pub fn median(data: &Array2<f64>) -> Result<f64> {
    if data.is_empty() {
        let (h, w) = data.dim();
        return Err(NucleonError::InvalidInput(format!(
            "cannot estimate background of an empty image ({w}x{h})"
        )));
    }

    let mut values: Vec<f64> = data.iter().copied().collect();
    let n = values.len();
    let mid = n / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
    let upper = *upper;

    if n % 2 == 1 {
        return Ok(upper);
    }

    let lower_max = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok((lower_max + upper) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_median_odd() {
        let data = array![[5.0, 1.0, 3.0]];
        assert_eq!(median(&data).unwrap(), 3.0);
    }

    #[test]
    fn test_median_even_averages_middle_pair() {
        let data = array![[4.0, 1.0], [3.0, 2.0]];
        assert_eq!(median(&data).unwrap(), 2.5);
    }

    #[test]
    fn test_median_empty_is_error() {
        let data = Array2::<f64>::zeros((0, 3));
        assert!(median(&data).is_err());
    }
}
