// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Backtest Engine - Deterministic Strategy Simulation Library
//!
//! Replays a historical price series against a trading-signal series and
//! reports how the strategy would have performed. The whole pipeline is
//! deterministic: identical inputs produce identical outputs, with no
//! clock, randomness, or I/O in the simulation path.
//!
//! # Pipeline
//!
//! - `models`: Price bars, signals, and pre-run series validation
//! - `strategy`: Signal sources (`SmaCrossover` dual moving-average crossover)
//! - `backtest`: The sequential `SimulationEngine` and the rayon `BatchRunner`
//! - `metrics`: `PerformanceCalculator` (returns, Sharpe, max drawdown)
//! - `risk`: `RiskAnalyzer` (tail risk, distribution shape, rolling analytics)
//!
//! # Example
//!
//! ```no_run
//! use backtest_engine::backtest::simulate;
//! use backtest_engine::config::SimulationConfig;
//! use backtest_engine::strategy::{SignalSource, SmaCrossover};
//!
//! # fn load_bars() -> Vec<backtest_engine::models::PriceBar> { Vec::new() }
//! # fn main() -> Result<(), backtest_engine::error::BacktestError> {
//! let bars = load_bars();
//! let source = SmaCrossover::new(20, 50)?;
//! let signals = source.generate_signals(&bars);
//!
//! let config = SimulationConfig::default();
//! let (_run, summary) = simulate(bars, &signals, rust_decimal::Decimal::new(100_000, 0), &config)?;
//! println!("final value: {}", summary.final_portfolio_value);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Simulation engine and batch runner.
pub mod backtest;

/// Policy defaults and tunable configuration.
pub mod config;

/// Error types.
pub mod error;

/// Performance metrics over the portfolio-value series.
pub mod metrics;

/// Input data types and validation.
pub mod models;

/// Tail-risk and distribution analytics.
pub mod risk;

/// Signal sources.
pub mod strategy;

pub use backtest::{BacktestJob, BacktestRun, BatchRunner, SimulationEngine, simulate};
pub use config::{RiskConfig, SimulationConfig};
pub use error::BacktestError;
pub use metrics::{PerformanceCalculator, PerformanceSummary};
pub use models::{PriceBar, Signal, validate_series};
pub use risk::{RiskAnalyzer, RiskReport, RiskSummary};
pub use strategy::{SignalSource, SmaCrossover};
