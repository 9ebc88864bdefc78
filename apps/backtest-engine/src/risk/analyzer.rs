//! Risk analyzer over a completed simulation.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::config::RiskConfig;
use crate::error::BacktestError;
use crate::metrics::calculator::daily_returns;
use crate::metrics::math::{excess_kurtosis, mean, percentile, sample_std, skewness};
use crate::models::PriceBar;

use super::rolling::{
    rolling_beta, rolling_correlation, rolling_mean, rolling_quantile, rolling_std,
};
use super::types::{RiskReport, RiskSummary, RollingAnalytics, RollingSeries};

/// Derives tail-risk and distribution metrics from a portfolio history.
///
/// The analyzer is stateless between calls: all inputs arrive through
/// `analyze` and every metric is a pure function of the return series.
#[derive(Debug, Clone, Default)]
pub struct RiskAnalyzer {
    config: RiskConfig,
}

impl RiskAnalyzer {
    /// Create an analyzer with the given window configuration.
    #[must_use]
    pub const fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Analyze a portfolio-value series against its price history.
    ///
    /// `bars` must align 1:1 with `portfolio_values`. When
    /// `benchmark_returns` is supplied it must align 1:1 with the derived
    /// portfolio returns (one fewer than the value count) and rolling beta
    /// is computed against it; otherwise rolling correlation against the
    /// instrument's own price returns is reported instead.
    ///
    /// # Errors
    ///
    /// Fails on fewer than two portfolio values, misaligned series, or a
    /// misaligned benchmark.
    pub fn analyze(
        &self,
        portfolio_values: &[Decimal],
        bars: &[PriceBar],
        benchmark_returns: Option<&[f64]>,
    ) -> Result<RiskReport, BacktestError> {
        if portfolio_values.len() < 2 {
            return Err(BacktestError::InsufficientHistory {
                required: 2,
                actual: portfolio_values.len(),
            });
        }
        if bars.len() != portfolio_values.len() {
            return Err(BacktestError::LengthMismatch {
                expected: portfolio_values.len(),
                actual: bars.len(),
            });
        }

        let values: Vec<f64> = portfolio_values
            .iter()
            .map(|v| v.to_f64().unwrap_or(0.0))
            .collect();
        let returns = daily_returns(&values);

        if let Some(benchmark) = benchmark_returns
            && benchmark.len() != returns.len()
        {
            return Err(BacktestError::BenchmarkMismatch {
                benchmark: benchmark.len(),
                returns: returns.len(),
            });
        }

        let summary = self.summarize(&returns);
        let rolling = self.rolling_analytics(&returns, bars, benchmark_returns);

        debug!(
            returns = returns.len(),
            volatility_annual = summary.volatility_annual,
            var_95 = summary.var_95,
            sortino = summary.sortino_ratio,
            "risk analysis complete"
        );

        Ok(RiskReport { summary, rolling })
    }

    fn summarize(&self, returns: &[f64]) -> RiskSummary {
        let annual_factor = f64::from(self.config.trading_days_per_year);

        let var_95 = percentile(returns, 5.0).unwrap_or(0.0);
        let var_99 = percentile(returns, 1.0).unwrap_or(0.0);

        RiskSummary {
            volatility_annual: sample_std(returns).unwrap_or(0.0) * annual_factor.sqrt(),
            skewness: skewness(returns).unwrap_or(0.0),
            kurtosis: excess_kurtosis(returns).unwrap_or(0.0),
            var_95,
            var_99,
            cvar_95: tail_mean(returns, var_95),
            cvar_99: tail_mean(returns, var_99),
            max_daily_loss: extreme(returns, f64::min),
            max_daily_gain: extreme(returns, f64::max),
            positive_days_ratio: positive_ratio(returns),
            calmar_ratio: self.calmar(returns),
            sortino_ratio: self.sortino(returns),
        }
    }

    /// Annualized mean return over the absolute maximum drawdown of the
    /// compounded return curve. Zero drawdown yields 0.
    fn calmar(&self, returns: &[f64]) -> f64 {
        let annual_return = self.annualized_mean(returns);

        let mut cumulative = 1.0;
        let mut peak = 1.0;
        let mut max_dd = 0.0_f64;
        for r in returns {
            cumulative *= 1.0 + r;
            if cumulative > peak {
                peak = cumulative;
            }
            let dd = (peak - cumulative) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }

        if max_dd == 0.0 {
            return 0.0;
        }
        annual_return / max_dd
    }

    /// Annualized mean return over annualized downside deviation. Series
    /// with fewer than two negative returns have no downside deviation and
    /// yield 0.
    fn sortino(&self, returns: &[f64]) -> f64 {
        let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
        let Some(std) = sample_std(&downside) else {
            return 0.0;
        };
        if std == 0.0 {
            return 0.0;
        }

        let deviation = std * f64::from(self.config.trading_days_per_year).sqrt();
        self.annualized_mean(returns) / deviation
    }

    fn annualized_mean(&self, returns: &[f64]) -> f64 {
        let avg = mean(returns).unwrap_or(0.0);
        (1.0 + avg).powf(f64::from(self.config.trading_days_per_year)) - 1.0
    }

    fn rolling_analytics(
        &self,
        returns: &[f64],
        bars: &[PriceBar],
        benchmark_returns: Option<&[f64]>,
    ) -> RollingAnalytics {
        let annual_sqrt = f64::from(self.config.trading_days_per_year).sqrt();
        let annual_days = f64::from(self.config.trading_days_per_year);

        let volatility = self
            .config
            .volatility_windows
            .iter()
            .map(|&window| RollingSeries {
                window,
                values: rolling_std(returns, window)
                    .into_iter()
                    .map(|s| s * annual_sqrt)
                    .collect(),
            })
            .collect();

        let var_95 = RollingSeries {
            window: self.config.var_window,
            values: rolling_quantile(returns, self.config.var_window, 5.0),
        };

        let mean_return = RollingSeries {
            window: self.config.var_window,
            values: rolling_mean(returns, self.config.var_window)
                .into_iter()
                .map(|m| m * annual_days)
                .collect(),
        };

        let (beta, correlation) = if let Some(benchmark) = benchmark_returns {
            let series = RollingSeries {
                window: self.config.beta_window,
                values: rolling_beta(returns, benchmark, self.config.beta_window),
            };
            (Some(series), None)
        } else {
            let price_returns = close_returns(bars);
            let series = RollingSeries {
                window: self.config.beta_window,
                values: rolling_correlation(returns, &price_returns, self.config.beta_window),
            };
            (None, Some(series))
        };

        RollingAnalytics {
            volatility,
            var_95,
            mean_return,
            beta,
            correlation,
        }
    }
}

/// Mean of returns at or below `threshold`. Falls back to the threshold
/// itself when no return breaches it.
fn tail_mean(returns: &[f64], threshold: f64) -> f64 {
    let tail: Vec<f64> = returns
        .iter()
        .copied()
        .filter(|r| *r <= threshold)
        .collect();
    mean(&tail).unwrap_or(threshold)
}

/// Reduce to the smallest/largest return; 0 for an empty series.
fn extreme(returns: &[f64], pick: fn(f64, f64) -> f64) -> f64 {
    returns.iter().copied().reduce(pick).unwrap_or(0.0)
}

fn positive_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().filter(|r| **r > 0.0).count() as f64 / returns.len() as f64
}

/// Per-bar close-to-close returns of the underlying instrument.
fn close_returns(bars: &[PriceBar]) -> Vec<f64> {
    let closes: Vec<f64> = bars
        .iter()
        .map(|b| b.close.to_f64().unwrap_or(0.0))
        .collect();
    daily_returns(&closes)
}
