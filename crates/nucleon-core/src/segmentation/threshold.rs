use ndarray::Array2;

use crate::consts::OTSU_HISTOGRAM_BINS;

/// Minimum and maximum sample, ignoring NaN. `None` for an empty grid.
pub fn min_max(data: &Array2<f64>) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Otsu's thresholding: the value that maximizes between-class variance.
///
/// Builds a 256-bin histogram over the data's own `[min, max]` range and
/// returns the centre of the last bin assigned to the lower class. When
/// several splits reach the maximum (empty bins between the classes), the
/// midpoint between the first and last of them is returned, so the cut sits
/// inside the gap instead of at its lower edge. Values may be negative. A
/// constant (or empty) input returns that constant (or 0.0), so
/// thresholding with `>` yields an empty mask.
pub fn otsu_threshold(data: &Array2<f64>) -> f64 {
    let Some((min, max)) = min_max(data) else {
        return 0.0;
    };
    if max <= min {
        return min;
    }

    let bins = OTSU_HISTOGRAM_BINS;
    let range = max - min;
    let bin_width = range / bins as f64;
    let mut histogram = vec![0u64; bins];

    for &v in data.iter().filter(|v| !v.is_nan()) {
        let bin = (((v - min) / range * bins as f64) as usize).min(bins - 1);
        histogram[bin] += 1;
    }

    let center = |i: usize| min + (i as f64 + 0.5) * bin_width;

    let total: f64 = histogram.iter().map(|&c| c as f64).sum();
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| center(i) * count as f64)
        .sum();

    let mut weight_bg = 0.0_f64;
    let mut sum_bg = 0.0_f64;
    let mut best_variance = f64::NEG_INFINITY;
    let mut best_first = 0usize;
    let mut best_last = 0usize;

    // The split after the last bin leaves the upper class empty.
    for (i, &count) in histogram.iter().enumerate().take(bins - 1) {
        weight_bg += count as f64;
        sum_bg += center(i) * count as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;
        let between_variance = weight_bg * weight_fg * (mean_bg - mean_fg).powi(2);

        if between_variance > best_variance {
            best_variance = between_variance;
            best_first = i;
            best_last = i;
        } else if between_variance == best_variance {
            best_last = i;
        }
    }

    (center(best_first) + center(best_last)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_skips_nan() {
        let data = Array2::from_shape_vec((1, 3), vec![f64::NAN, -2.0, 7.0]).unwrap();
        assert_eq!(min_max(&data), Some((-2.0, 7.0)));
    }

    #[test]
    fn test_min_max_empty() {
        assert_eq!(min_max(&Array2::<f64>::zeros((0, 0))), None);
    }
}
