//! Simple-moving-average crossover signal source.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::BacktestError;
use crate::models::{PriceBar, Signal};

use super::SignalSource;

/// Default short moving-average window.
pub const DEFAULT_SHORT_WINDOW: usize = 20;

/// Default long moving-average window.
pub const DEFAULT_LONG_WINDOW: usize = 50;

/// Dual simple-moving-average crossover over closing prices.
///
/// Emits `Buy` on the bar where the short average crosses strictly above
/// the long average, `Sell` on the mirror cross below, and `Hold`
/// everywhere else. Bars inside the warmup period (fewer than `long`
/// closes of history) always hold: an average that does not exist yet
/// cannot cross.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmaCrossover {
    short: usize,
    long: usize,
}

impl SmaCrossover {
    /// Create a crossover source with the given window pair.
    ///
    /// # Errors
    ///
    /// The short window must be nonzero and strictly smaller than the
    /// long window.
    pub fn new(short: usize, long: usize) -> Result<Self, BacktestError> {
        if short == 0 || short >= long {
            return Err(BacktestError::InvalidWindows { short, long });
        }
        Ok(Self { short, long })
    }

    /// Short window size in bars.
    #[must_use]
    pub const fn short_window(&self) -> usize {
        self.short
    }

    /// Long window size in bars.
    #[must_use]
    pub const fn long_window(&self) -> usize {
        self.long
    }

    /// The two indicator series, aligned to `bars`. Warmup entries are
    /// `None`.
    #[must_use]
    pub fn indicators(&self, bars: &[PriceBar]) -> (Vec<Option<Decimal>>, Vec<Option<Decimal>>) {
        let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();
        (
            sma_series(&closes, self.short),
            sma_series(&closes, self.long),
        )
    }
}

impl Default for SmaCrossover {
    fn default() -> Self {
        Self {
            short: DEFAULT_SHORT_WINDOW,
            long: DEFAULT_LONG_WINDOW,
        }
    }
}

impl SignalSource for SmaCrossover {
    fn generate_signals(&self, bars: &[PriceBar]) -> Vec<Signal> {
        let (short, long) = self.indicators(bars);

        let mut signals = vec![Signal::Hold; bars.len()];
        for i in 1..bars.len() {
            let (Some(ps), Some(pl), Some(cs), Some(cl)) =
                (short[i - 1], long[i - 1], short[i], long[i])
            else {
                continue;
            };

            if ps <= pl && cs > cl {
                signals[i] = Signal::Buy;
            } else if ps >= pl && cs < cl {
                signals[i] = Signal::Sell;
            }
        }

        debug!(
            bars = bars.len(),
            short = self.short,
            long = self.long,
            buys = signals.iter().filter(|s| **s == Signal::Buy).count(),
            sells = signals.iter().filter(|s| **s == Signal::Sell).count(),
            "crossover signals generated"
        );

        signals
    }
}

/// Simple moving average aligned to the input: entry `i` averages
/// `values[i + 1 - window ..= i]`, `None` until a full window exists.
#[must_use]
pub fn sma_series(values: &[Decimal], window: usize) -> Vec<Option<Decimal>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let divisor = Decimal::from(window as u64);
    let mut out = Vec::with_capacity(values.len());
    let mut running = Decimal::ZERO;

    for (i, value) in values.iter().enumerate() {
        running += *value;
        if i + 1 < window {
            out.push(None);
            continue;
        }
        if i + 1 > window {
            running -= values[i - window];
        }
        out.push(Some(running / divisor));
    }

    out
}
