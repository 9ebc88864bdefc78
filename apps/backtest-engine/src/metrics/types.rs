//! Performance summary types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Performance summary for one completed simulation.
///
/// Ratio and percentage metrics are plain `f64`; degenerate inputs (zero
/// variance, zero drawdown) yield a `0.0` sentinel rather than NaN or
/// infinity, so every field is always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceSummary {
    /// Total return over the run, in percent.
    pub total_return_pct: f64,
    /// Annualized return, in percent.
    pub annual_return_pct: f64,
    /// Annualized Sharpe ratio (0 when returns have no variance).
    pub sharpe_ratio: f64,
    /// Maximum peak-to-trough decline, in percent (>= 0).
    pub max_drawdown_pct: f64,
    /// Final portfolio value.
    pub final_portfolio_value: Decimal,
}

impl PerformanceSummary {
    /// Metric-name map view of the summary for report sinks.
    #[must_use]
    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("total_return_pct", self.total_return_pct),
            ("annual_return_pct", self.annual_return_pct),
            ("sharpe_ratio", self.sharpe_ratio),
            ("max_drawdown_pct", self.max_drawdown_pct),
            (
                "final_portfolio_value",
                self.final_portfolio_value.to_f64().unwrap_or(0.0),
            ),
        ])
    }
}
