//! Statistical helpers shared by the performance and risk layers.
//!
//! Conventions match the usual pandas/numpy/scipy defaults: sample standard
//! deviation (n-1 denominator), population moments for skewness/kurtosis,
//! and linear interpolation between order statistics for percentiles.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n-1 denominator). `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Sample covariance of two equal-length slices (n-1 denominator).
pub fn sample_cov(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let cov = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .sum::<f64>()
        / (xs.len() - 1) as f64;
    Some(cov)
}

/// Pearson correlation. `None` when either side has zero variance.
pub fn correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let cov = sample_cov(xs, ys)?;
    let sx = sample_std(xs)?;
    let sy = sample_std(ys)?;
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    Some(cov / (sx * sy))
}

/// p-th percentile (0..=100) with linear interpolation between order
/// statistics. `None` for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }

    let weight = rank - lo as f64;
    Some(sorted[lo] * (1.0 - weight) + sorted[hi] * weight)
}

/// Third standardized moment (population). `None` on zero variance.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let (m2, m3, _) = central_moments(values)?;
    if m2 == 0.0 {
        return None;
    }
    Some(m3 / m2.powf(1.5))
}

/// Excess kurtosis: fourth standardized moment minus 3 (population).
/// `None` on zero variance.
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    let (m2, _, m4) = central_moments(values)?;
    if m2 == 0.0 {
        return None;
    }
    Some(m4 / m2.powi(2) - 3.0)
}

/// Second, third and fourth central moments with n denominator.
fn central_moments(values: &[f64]) -> Option<(f64, f64, f64)> {
    let avg = mean(values)?;
    let n = values.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for v in values {
        let d = v - avg;
        m2 += d * d;
        m3 += d * d * d;
        m4 += d * d * d * d;
    }
    Some((m2 / n, m3 / n, m4 / n))
}
