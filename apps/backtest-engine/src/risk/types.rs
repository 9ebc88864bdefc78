//! Risk report types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Scalar risk metrics over the full return series.
///
/// Degenerate inputs (zero variance, zero drawdown, no downside returns)
/// yield a `0.0` sentinel; no field is ever NaN or infinite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RiskSummary {
    /// Annualized volatility of returns.
    pub volatility_annual: f64,
    /// Third standardized moment of returns.
    pub skewness: f64,
    /// Excess kurtosis (fourth standardized moment minus 3).
    pub kurtosis: f64,
    /// 5th-percentile return (95% Value at Risk).
    pub var_95: f64,
    /// 1st-percentile return (99% Value at Risk).
    pub var_99: f64,
    /// Mean return at or below the 95% VaR threshold.
    pub cvar_95: f64,
    /// Mean return at or below the 99% VaR threshold.
    pub cvar_99: f64,
    /// Worst single-bar return.
    pub max_daily_loss: f64,
    /// Best single-bar return.
    pub max_daily_gain: f64,
    /// Fraction of bars with a positive return.
    pub positive_days_ratio: f64,
    /// Annualized return over absolute maximum drawdown.
    pub calmar_ratio: f64,
    /// Annualized return over annualized downside deviation.
    pub sortino_ratio: f64,
}

impl RiskSummary {
    /// Metric-name map view of the summary for report sinks.
    #[must_use]
    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("volatility_annual", self.volatility_annual),
            ("skewness", self.skewness),
            ("kurtosis", self.kurtosis),
            ("var_95", self.var_95),
            ("var_99", self.var_99),
            ("cvar_95", self.cvar_95),
            ("cvar_99", self.cvar_99),
            ("max_daily_loss", self.max_daily_loss),
            ("max_daily_gain", self.max_daily_gain),
            ("positive_days_ratio", self.positive_days_ratio),
            ("calmar_ratio", self.calmar_ratio),
            ("sortino_ratio", self.sortino_ratio),
        ])
    }
}

/// One rolling metric series.
///
/// `values[k]` is the metric over the window ending at return index
/// `k + window - 1`. The first `window - 1` indices produce no output;
/// a series shorter than the window is empty, never zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingSeries {
    /// Window size in bars.
    pub window: usize,
    /// Metric values, one per full window.
    pub values: Vec<f64>,
}

impl RollingSeries {
    /// Return index of the first produced value.
    #[must_use]
    pub const fn start_index(&self) -> usize {
        self.window - 1
    }
}

/// Rolling analytics over the return series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingAnalytics {
    /// Annualized rolling volatility, one series per configured window.
    pub volatility: Vec<RollingSeries>,
    /// Rolling 95% VaR (5th-percentile return over the window).
    pub var_95: RollingSeries,
    /// Annualized rolling mean return (risk-return evolution numerator).
    pub mean_return: RollingSeries,
    /// Rolling beta against the benchmark, when one was supplied.
    pub beta: Option<RollingSeries>,
    /// Rolling correlation with the instrument's own returns, when no
    /// benchmark was supplied.
    pub correlation: Option<RollingSeries>,
}

/// Complete risk report: scalar metrics plus rolling analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Scalar metrics over the full series.
    pub summary: RiskSummary,
    /// Rolling-window analytics.
    pub rolling: RollingAnalytics,
}
