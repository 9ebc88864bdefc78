//! Distributional and tail-risk analytics.
//!
//! Derives risk metrics from the strategy's return series:
//! - Annualized volatility, skewness, excess kurtosis
//! - Value at Risk and Conditional VaR at 95%/99%
//! - Calmar and Sortino ratios
//! - Rolling volatility, VaR, beta/correlation windows

mod analyzer;
mod rolling;
mod types;

pub use analyzer::RiskAnalyzer;
pub use rolling::{
    rolling_beta, rolling_correlation, rolling_mean, rolling_quantile, rolling_std,
};
pub use types::{RiskReport, RiskSummary, RollingAnalytics, RollingSeries};
