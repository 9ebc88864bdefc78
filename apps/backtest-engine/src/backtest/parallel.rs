//! Parallel multi-symbol backtest runner using Rayon.
//!
//! Each symbol gets its own engine instance: runs share configuration but
//! no mutable state, so a batch is embarrassingly parallel and the output
//! for a given symbol is identical to a standalone sequential run.

use std::time::Instant;

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::SimulationConfig;
use crate::error::BacktestError;
use crate::metrics::{PerformanceCalculator, PerformanceSummary};
use crate::models::PriceBar;
use crate::strategy::SignalSource;

use super::engine::SimulationEngine;
use super::result::BacktestRun;

/// One symbol's input to a batch run.
#[derive(Debug, Clone)]
pub struct BacktestJob {
    /// Instrument identifier, carried through to the result.
    pub symbol: String,
    /// Price series for the instrument.
    pub bars: Vec<PriceBar>,
    /// Starting capital for this run.
    pub initial_capital: Decimal,
}

/// One symbol's outcome from a batch run.
#[derive(Debug, Clone)]
pub struct JobResult {
    /// Instrument identifier from the job.
    pub symbol: String,
    /// Simulation output and metrics, or the failure for this symbol.
    pub outcome: Result<(BacktestRun, PerformanceSummary), BacktestError>,
}

/// Multi-symbol batch runner.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: SimulationConfig,
    min_parallel_jobs: usize,
}

impl BatchRunner {
    /// Create a runner with the given simulation configuration.
    #[must_use]
    pub const fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            min_parallel_jobs: 2,
        }
    }

    /// Minimum batch size before the runner fans out to the thread pool.
    /// Smaller batches run sequentially to skip the scheduling overhead.
    #[must_use]
    pub const fn with_min_parallel_jobs(mut self, min: usize) -> Self {
        self.min_parallel_jobs = min;
        self
    }

    /// Run every job, one engine per symbol.
    ///
    /// A failed symbol does not abort the batch: its error is carried in
    /// the corresponding [`JobResult`]. Results keep the input job order.
    #[must_use]
    pub fn run<S: SignalSource + Sync>(&self, source: &S, jobs: Vec<BacktestJob>) -> Vec<JobResult> {
        let start = Instant::now();
        let total = jobs.len();

        let results: Vec<JobResult> = if total >= self.min_parallel_jobs {
            jobs.into_par_iter()
                .map(|job| self.run_job(source, job))
                .collect()
        } else {
            jobs.into_iter()
                .map(|job| self.run_job(source, job))
                .collect()
        };

        let succeeded = results.iter().filter(|r| r.outcome.is_ok()).count();
        info!(
            total,
            succeeded,
            failed = total - succeeded,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Batch run complete"
        );

        results
    }

    fn run_job<S: SignalSource + Sync>(&self, source: &S, job: BacktestJob) -> JobResult {
        let signals = source.generate_signals(&job.bars);
        let outcome = simulate(job.bars, &signals, job.initial_capital, &self.config);
        JobResult {
            symbol: job.symbol,
            outcome,
        }
    }
}

/// Run one complete simulation: validate, replay signals, derive metrics.
///
/// # Errors
///
/// Propagates any validation or alignment failure from the engine or the
/// metrics calculator.
pub fn simulate(
    bars: Vec<PriceBar>,
    signals: &[crate::models::Signal],
    initial_capital: Decimal,
    config: &SimulationConfig,
) -> Result<(BacktestRun, PerformanceSummary), BacktestError> {
    let mut engine = SimulationEngine::new(config.clone());
    engine.initialize(bars, initial_capital)?;
    let run = engine.run(signals)?;

    let summary = PerformanceCalculator::new(initial_capital)
        .with_trading_days(config.trading_days_per_year)
        .calculate(&run.portfolio_values)?;

    Ok((run, summary))
}
