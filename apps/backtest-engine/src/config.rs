//! Simulation and risk-analysis configuration types.
//!
//! The 0.95 cash buffer and the 252-day annualization factor are policy
//! choices inherited from the reference strategy. They are carried here as
//! documented defaults rather than hardcoded literals so callers can tune
//! them per instrument or market calendar.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading days per year used for annualization.
pub const DEFAULT_TRADING_DAYS: u32 = 252;

/// Fraction of cash deployed on a buy signal (remainder buffers fees/slippage).
pub const DEFAULT_CASH_BUFFER: Decimal = Decimal::from_parts(95, 0, 0, false, 2);

/// Simulation engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fraction of available cash deployed per entry (0 < buffer <= 1).
    pub cash_buffer: Decimal,
    /// Trading days per year for annualized metrics.
    pub trading_days_per_year: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cash_buffer: DEFAULT_CASH_BUFFER,         // 0.95
            trading_days_per_year: DEFAULT_TRADING_DAYS, // 252
        }
    }
}

/// Risk analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Trading days per year for annualized volatility/returns.
    pub trading_days_per_year: u32,
    /// Rolling volatility window sizes in bars.
    pub volatility_windows: Vec<usize>,
    /// Rolling VaR window size in bars.
    pub var_window: usize,
    /// Rolling beta/correlation window size in bars.
    pub beta_window: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: DEFAULT_TRADING_DAYS,
            volatility_windows: vec![20, 60, 120], // 1, 3, 6 months
            var_window: 60,
            beta_window: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_simulation_config() {
        let config = SimulationConfig::default();

        assert_eq!(config.cash_buffer, Decimal::new(95, 2));
        assert_eq!(config.trading_days_per_year, 252);
    }

    #[test]
    fn test_default_risk_config() {
        let config = RiskConfig::default();

        assert_eq!(config.volatility_windows, vec![20, 60, 120]);
        assert_eq!(config.var_window, 60);
        assert_eq!(config.beta_window, 60);
    }
}
