//! Performance calculator for the portfolio-value series.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::DEFAULT_TRADING_DAYS;
use crate::error::BacktestError;

use super::math::{mean, sample_std};
use super::types::PerformanceSummary;

/// Derives return-based metrics from a portfolio-value history.
///
/// All ratios operate on the portfolio value series, not the raw asset
/// price: Sharpe and drawdown characterize the strategy, not the
/// underlying instrument.
#[derive(Debug, Clone)]
pub struct PerformanceCalculator {
    initial_capital: Decimal,
    trading_days: u32,
}

impl PerformanceCalculator {
    /// Create a calculator with the default 252-day annualization.
    #[must_use]
    pub const fn new(initial_capital: Decimal) -> Self {
        Self {
            initial_capital,
            trading_days: DEFAULT_TRADING_DAYS,
        }
    }

    /// Override the trading-days-per-year annualization constant.
    #[must_use]
    pub const fn with_trading_days(mut self, trading_days: u32) -> Self {
        self.trading_days = trading_days;
        self
    }

    /// Calculate all performance metrics.
    ///
    /// # Errors
    ///
    /// Requires at least two portfolio values and positive initial capital.
    pub fn calculate(
        &self,
        portfolio_values: &[Decimal],
    ) -> Result<PerformanceSummary, BacktestError> {
        if portfolio_values.len() < 2 {
            return Err(BacktestError::InsufficientHistory {
                required: 2,
                actual: portfolio_values.len(),
            });
        }
        if self.initial_capital <= Decimal::ZERO {
            return Err(BacktestError::NonPositiveCapital {
                capital: self.initial_capital.to_string(),
            });
        }

        let values: Vec<f64> = portfolio_values
            .iter()
            .map(|v| v.to_f64().unwrap_or(0.0))
            .collect();
        let v0 = self.initial_capital.to_f64().unwrap_or(0.0);
        let v_last = values[values.len() - 1];

        let total_return_pct = (v_last - v0) / v0 * 100.0;

        let annual_exponent = f64::from(self.trading_days) / values.len() as f64;
        let annual_return_pct = ((v_last / v0).powf(annual_exponent) - 1.0) * 100.0;

        let returns = daily_returns(&values);
        let sharpe_ratio = self.sharpe(&returns);
        let max_drawdown_pct = max_drawdown(&values) * 100.0;

        let final_portfolio_value = portfolio_values[portfolio_values.len() - 1];

        Ok(PerformanceSummary {
            total_return_pct,
            annual_return_pct,
            sharpe_ratio,
            max_drawdown_pct,
            final_portfolio_value,
        })
    }

    /// Annualized Sharpe: sqrt(trading_days) * mean / std of daily returns.
    ///
    /// A flat series has zero standard deviation; the ratio is defined as 0
    /// there so NaN/Inf never propagate out of the report.
    fn sharpe(&self, returns: &[f64]) -> f64 {
        let Some(avg) = mean(returns) else {
            return 0.0;
        };
        let Some(std) = sample_std(returns) else {
            return 0.0;
        };
        if std == 0.0 {
            return 0.0;
        }
        f64::from(self.trading_days).sqrt() * avg / std
    }
}

/// Simple per-bar returns `v_i / v_{i-1} - 1`, first element dropped.
pub(crate) fn daily_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect()
}

/// Maximum drawdown against the running peak, as a fraction in [0, 1].
pub(crate) fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0;

    for &v in values {
        if v > peak {
            peak = v;
        }
        if peak > 0.0 {
            let dd = (peak - v) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}
