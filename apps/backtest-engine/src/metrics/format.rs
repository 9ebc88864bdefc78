//! Formatting helpers for metric display.

/// Format a percentage metric.
#[must_use]
pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

/// Format a ratio metric.
#[must_use]
pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}")
}
