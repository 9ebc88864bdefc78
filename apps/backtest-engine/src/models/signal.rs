//! Trading signal type.

use serde::{Deserialize, Serialize};

/// Directional trading instruction for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    /// Enter a long position.
    Buy,
    /// Liquidate all open positions.
    Sell,
    /// No action.
    #[default]
    Hold,
}

impl Signal {
    /// Numeric encoding used in exported series (1 buy, -1 sell, 0 hold).
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
            Self::Hold => 0,
        }
    }
}
