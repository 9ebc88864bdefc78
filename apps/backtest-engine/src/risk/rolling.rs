//! Rolling-window statistics over return series.
//!
//! Every helper emits one value per full window: the output aligns to
//! input index `k + window - 1` and an input shorter than the window
//! produces an empty vector rather than partial-window estimates.

use crate::metrics::math::{correlation, mean, sample_cov, sample_std};

/// Rolling sample standard deviation.
#[must_use]
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| sample_std(w).unwrap_or(0.0))
}

/// Rolling arithmetic mean.
#[must_use]
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling(values, window, |w| mean(w).unwrap_or(0.0))
}

/// Rolling p-th percentile with linear interpolation.
#[must_use]
pub fn rolling_quantile(values: &[f64], window: usize, p: f64) -> Vec<f64> {
    rolling(values, window, |w| {
        crate::metrics::math::percentile(w, p).unwrap_or(0.0)
    })
}

/// Rolling beta of `returns` against `benchmark`: cov / benchmark variance.
///
/// Windows where the benchmark has zero variance yield 0.
#[must_use]
pub fn rolling_beta(returns: &[f64], benchmark: &[f64], window: usize) -> Vec<f64> {
    if returns.len() != benchmark.len() || returns.len() < window || window < 2 {
        return Vec::new();
    }

    (0..=returns.len() - window)
        .map(|i| {
            let rs = &returns[i..i + window];
            let bs = &benchmark[i..i + window];
            let var = sample_std(bs).map_or(0.0, |s| s * s);
            if var == 0.0 {
                return 0.0;
            }
            sample_cov(rs, bs).unwrap_or(0.0) / var
        })
        .collect()
}

/// Rolling Pearson correlation between two aligned series.
///
/// Zero-variance windows on either side yield 0.
#[must_use]
pub fn rolling_correlation(xs: &[f64], ys: &[f64], window: usize) -> Vec<f64> {
    if xs.len() != ys.len() || xs.len() < window || window < 2 {
        return Vec::new();
    }

    (0..=xs.len() - window)
        .map(|i| correlation(&xs[i..i + window], &ys[i..i + window]).unwrap_or(0.0))
        .collect()
}

fn rolling<F>(values: &[f64], window: usize, stat: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    values.windows(window).map(stat).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_output_length() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();

        assert_eq!(rolling_mean(&values, 3).len(), 8);
        assert_eq!(rolling_std(&values, 10).len(), 1);
        assert_eq!(rolling_std(&values, 11).len(), 0);
    }

    #[test]
    fn test_rolling_mean_values() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(rolling_mean(&values, 2), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_rolling_std_flat_window_is_zero() {
        let values = [1.0, 1.0, 1.0, 2.0];
        let stds = rolling_std(&values, 3);

        assert_eq!(stds.len(), 2);
        assert_eq!(stds[0], 0.0);
        assert!(stds[1] > 0.0);
    }

    #[test]
    fn test_rolling_quantile_is_window_minimum_at_zero() {
        let values = [3.0, 1.0, 2.0, 5.0];
        assert_eq!(rolling_quantile(&values, 2, 0.0), vec![1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_rolling_beta_unit_for_identical_series() {
        let returns = [0.01, -0.02, 0.03, 0.01, -0.01];
        let betas = rolling_beta(&returns, &returns, 3);

        assert_eq!(betas.len(), 3);
        for beta in betas {
            assert!((beta - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rolling_beta_misaligned_is_empty() {
        assert!(rolling_beta(&[0.1, 0.2, 0.3], &[0.1, 0.2], 2).is_empty());
    }

    #[test]
    fn test_rolling_correlation_flat_benchmark_is_zero() {
        let returns = [0.01, -0.02, 0.03, 0.01];
        let flat = [0.0; 4];
        let corr = rolling_correlation(&returns, &flat, 3);

        assert_eq!(corr, vec![0.0, 0.0]);
    }
}
