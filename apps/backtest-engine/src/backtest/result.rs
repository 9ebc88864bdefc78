//! Output types of a simulation run.

use std::fmt::Write;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PriceBar, Signal};

/// One bar of the augmented output series: the input bar joined with the
/// signal applied at that bar and the portfolio value after applying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedBar {
    /// The input price bar.
    pub bar: PriceBar,
    /// Signal applied at this bar.
    pub signal: Signal,
    /// Portfolio value (cash + marked-to-market positions) after this bar.
    pub portfolio_value: Decimal,
}

/// Completed simulation run: the augmented series plus the portfolio-value
/// history, aligned 1:1 with the input price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRun {
    /// Augmented output series.
    pub bars: Vec<AugmentedBar>,
    /// Portfolio value after each bar.
    pub portfolio_values: Vec<Decimal>,
}

impl BacktestRun {
    /// Export the augmented series as CSV.
    ///
    /// Format-agnostic persistence boundary: callers own where the bytes go.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut csv =
            String::from("date,open,high,low,close,volume,signal,portfolio_value\n");

        for row in &self.bars {
            let _ = writeln!(
                csv,
                "{},{},{},{},{},{},{},{}",
                row.bar.date,
                row.bar.open,
                row.bar.high,
                row.bar.low,
                row.bar.close,
                row.bar.volume,
                row.signal.as_i8(),
                row.portfolio_value,
            );
        }

        csv
    }
}
