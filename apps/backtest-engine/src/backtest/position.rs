//! Open position state for the simulation engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One open lot held by the simulation.
///
/// The reference strategy holds at most one lot at a time (all-in on Buy,
/// all-out on Sell), but the engine carries a list of lots so multi-lot
/// policies remain possible without changing the state model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Number of units held.
    pub size: u64,
    /// Price paid per unit at entry.
    pub entry_price: Decimal,
    /// Date the lot was opened.
    pub entry_date: NaiveDate,
}

impl Position {
    /// Create a new lot.
    #[must_use]
    pub const fn new(size: u64, entry_price: Decimal, entry_date: NaiveDate) -> Self {
        Self {
            size,
            entry_price,
            entry_date,
        }
    }

    /// Market value of the lot at the given price.
    #[must_use]
    pub fn market_value(&self, price: Decimal) -> Decimal {
        Decimal::from(self.size) * price
    }

    /// Cost basis of the lot.
    #[must_use]
    pub fn cost_basis(&self) -> Decimal {
        self.market_value(self.entry_price)
    }
}
