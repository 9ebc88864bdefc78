//! Price bar type and pre-run series validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BacktestError;

/// One discrete time-indexed OHLCV price observation.
///
/// A price series is an ordered sequence of bars with strictly increasing
/// dates and positive prices. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Calendar date of the bar.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume.
    pub volume: u64,
}

impl PriceBar {
    /// Create a new price bar.
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Validate a price series before simulation.
///
/// Checks that the series is non-empty, dates are strictly increasing
/// (which also rejects duplicates), and all OHLC prices are positive.
/// Runs before any state mutation so a failed run is never partial.
///
/// # Errors
///
/// Returns [`BacktestError`] describing the first violation found.
pub fn validate_series(bars: &[PriceBar]) -> Result<(), BacktestError> {
    if bars.is_empty() {
        return Err(BacktestError::EmptySeries);
    }

    for (index, bar) in bars.iter().enumerate() {
        for (field, price) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if price <= Decimal::ZERO {
                return Err(BacktestError::NonPositivePrice { index, field });
            }
        }

        if index > 0 {
            let previous = bars[index - 1].date;
            if bar.date <= previous {
                return Err(BacktestError::NonMonotonicDates {
                    index,
                    date: bar.date.to_string(),
                    previous: previous.to_string(),
                });
            }
        }
    }

    Ok(())
}
