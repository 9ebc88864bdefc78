//! Performance metrics for completed simulation runs.
//!
//! Implements standard strategy-level metrics over the portfolio-value
//! series (not the raw asset price):
//! - Total and annualized return
//! - Sharpe ratio (risk-adjusted returns)
//! - Maximum drawdown (peak-to-trough decline)

pub(crate) mod calculator;
mod format;
pub(crate) mod math;
mod types;

pub use calculator::PerformanceCalculator;
pub use format::{format_pct, format_ratio};
pub use types::PerformanceSummary;
