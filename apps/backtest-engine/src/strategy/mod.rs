//! Signal sources for the simulation engine.
//!
//! A signal source maps a price series to one [`Signal`] per bar without
//! ever reading past the bar it is deciding for. The engine consumes the
//! resulting series positionally.

mod sma_crossover;

pub use sma_crossover::{DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW, SmaCrossover, sma_series};

use crate::models::{PriceBar, Signal};

/// A deterministic mapping from a price series to an aligned signal series.
///
/// Implementations must be causal: the signal at index `i` may depend only
/// on bars `0..=i`.
pub trait SignalSource {
    /// Produce exactly one signal per input bar.
    fn generate_signals(&self, bars: &[PriceBar]) -> Vec<Signal>;
}

/// Generate crossover signals for the given window pair in one call.
///
/// # Errors
///
/// Rejects a degenerate window pair (see [`SmaCrossover::new`]).
pub fn generate_signals(
    bars: &[PriceBar],
    short: usize,
    long: usize,
) -> Result<Vec<Signal>, crate::error::BacktestError> {
    Ok(SmaCrossover::new(short, long)?.generate_signals(bars))
}
