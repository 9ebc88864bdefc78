//! Sequential simulation engine.
//!
//! Replays price bars and signals in strict index order, folding an explicit
//! cash/position state forward one bar at a time. Decisions at bar `i` use
//! only data at or before bar `i`; nothing here reads ahead.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::BacktestError;
use crate::models::{PriceBar, Signal, validate_series};

use super::position::Position;
use super::result::{AugmentedBar, BacktestRun};

/// Bar-by-bar portfolio simulation engine.
///
/// Owns its state exclusively for the duration of one run. Independent
/// simulations (one engine per symbol) share nothing and may be run in
/// parallel by the caller.
#[derive(Debug)]
pub struct SimulationEngine {
    config: SimulationConfig,
    bars: Vec<PriceBar>,
    cash: Decimal,
    initial_capital: Decimal,
    positions: Vec<Position>,
    portfolio_values: Vec<Decimal>,
}

impl SimulationEngine {
    /// Create an engine with the given policy configuration.
    #[must_use]
    pub const fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            bars: Vec::new(),
            cash: Decimal::ZERO,
            initial_capital: Decimal::ZERO,
            positions: Vec::new(),
            portfolio_values: Vec::new(),
        }
    }

    /// Get the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current cash balance.
    #[must_use]
    pub const fn cash(&self) -> Decimal {
        self.cash
    }

    /// Open positions.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Portfolio value history recorded so far.
    #[must_use]
    pub fn portfolio_values(&self) -> &[Decimal] {
        &self.portfolio_values
    }

    /// Reset state and load a validated price series.
    ///
    /// # Errors
    ///
    /// Fails fast on an empty series, non-monotonic or duplicate dates,
    /// non-positive prices, or non-positive capital. No state is mutated
    /// on error.
    pub fn initialize(
        &mut self,
        bars: Vec<PriceBar>,
        initial_capital: Decimal,
    ) -> Result<(), BacktestError> {
        validate_series(&bars)?;
        if initial_capital <= Decimal::ZERO {
            return Err(BacktestError::NonPositiveCapital {
                capital: initial_capital.to_string(),
            });
        }

        self.bars = bars;
        self.cash = initial_capital;
        self.initial_capital = initial_capital;
        self.positions.clear();
        self.portfolio_values.clear();

        Ok(())
    }

    /// Replay the signal series over the loaded bars.
    ///
    /// For each bar the signal is applied first (Buy/Sell/Hold), then the
    /// portfolio is marked to market at that bar's close and the value
    /// appended to the history. Positions still open after the last bar
    /// stay open (mark-to-market, no forced exit).
    ///
    /// # Errors
    ///
    /// Returns [`BacktestError::NotInitialized`] if `initialize` has not
    /// been called, or [`BacktestError::LengthMismatch`] if the signal
    /// series is not aligned with the price series.
    pub fn run(&mut self, signals: &[Signal]) -> Result<BacktestRun, BacktestError> {
        if self.bars.is_empty() {
            return Err(BacktestError::NotInitialized);
        }
        if signals.len() != self.bars.len() {
            return Err(BacktestError::LengthMismatch {
                expected: self.bars.len(),
                actual: signals.len(),
            });
        }

        let bars = std::mem::take(&mut self.bars);
        let mut augmented = Vec::with_capacity(bars.len());

        for (bar, &signal) in bars.iter().zip(signals) {
            self.apply_signal(bar, signal);

            let value = self.mark_to_market(bar.close);
            self.portfolio_values.push(value);
            augmented.push(AugmentedBar {
                bar: bar.clone(),
                signal,
                portfolio_value: value,
            });
        }

        info!(
            bars = augmented.len(),
            final_value = %self.portfolio_values.last().copied().unwrap_or(self.initial_capital),
            open_positions = self.positions.len(),
            "Simulation complete"
        );

        Ok(BacktestRun {
            bars: augmented,
            portfolio_values: self.portfolio_values.clone(),
        })
    }

    /// Apply one signal against the current bar's close.
    fn apply_signal(&mut self, bar: &PriceBar, signal: Signal) {
        match signal {
            Signal::Buy => self.enter(bar),
            Signal::Sell => self.liquidate(bar),
            Signal::Hold => {}
        }
    }

    /// Open a lot if cash covers at least one unit at the close.
    ///
    /// Sizing reserves `1 - cash_buffer` of cash for fees/slippage. A Buy
    /// that cannot afford a single unit is skipped silently (deliberate
    /// skip-trade policy, not an error).
    fn enter(&mut self, bar: &PriceBar) {
        if self.cash <= bar.close {
            return;
        }

        let size = (self.cash * self.config.cash_buffer / bar.close)
            .floor()
            .to_u64()
            .unwrap_or(0);
        if size == 0 {
            debug!(date = %bar.date, close = %bar.close, "Buy skipped: size rounds to zero");
            return;
        }

        let cost = Decimal::from(size) * bar.close;
        self.cash -= cost;
        self.positions.push(Position::new(size, bar.close, bar.date));

        info!(
            date = %bar.date,
            size,
            entry_price = %bar.close,
            cash = %self.cash,
            "Position opened"
        );
    }

    /// Liquidate all open lots at the bar's close. No-op when flat.
    fn liquidate(&mut self, bar: &PriceBar) {
        if self.positions.is_empty() {
            return;
        }

        let proceeds: Decimal = self
            .positions
            .iter()
            .map(|p| p.market_value(bar.close))
            .sum();
        self.cash += proceeds;

        info!(
            date = %bar.date,
            lots = self.positions.len(),
            exit_price = %bar.close,
            proceeds = %proceeds,
            cash = %self.cash,
            "Positions liquidated"
        );

        self.positions.clear();
    }

    /// Portfolio value at the given close: cash plus open lots marked to market.
    fn mark_to_market(&self, close: Decimal) -> Decimal {
        self.positions
            .iter()
            .fold(self.cash, |value, p| value + p.market_value(close))
    }
}
