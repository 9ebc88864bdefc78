//! Error types for the backtest engine.

use thiserror::Error;

/// Errors raised while validating inputs or running a simulation.
///
/// All variants are reported synchronously before any state mutation:
/// a run either completes fully over its input or fails fast here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BacktestError {
    /// Price series is empty.
    #[error("Price series is empty")]
    EmptySeries,

    /// Two series that must be aligned 1:1 have different lengths.
    #[error("Series length mismatch: expected {expected} aligned values, got {actual}")]
    LengthMismatch {
        /// Length of the reference series.
        expected: usize,
        /// Length of the misaligned series.
        actual: usize,
    },

    /// Bar dates are not strictly increasing.
    #[error("Non-monotonic date at bar {index}: {date} does not follow {previous}")]
    NonMonotonicDates {
        /// Index of the offending bar.
        index: usize,
        /// Date of the offending bar.
        date: String,
        /// Date of the preceding bar.
        previous: String,
    },

    /// A bar carries a non-positive price.
    #[error("Non-positive {field} price at bar {index}")]
    NonPositivePrice {
        /// Index of the offending bar.
        index: usize,
        /// Which OHLC field failed validation.
        field: &'static str,
    },

    /// Initial capital must be positive.
    #[error("Initial capital must be positive, got {capital}")]
    NonPositiveCapital {
        /// Supplied capital.
        capital: String,
    },

    /// Engine was run before `initialize`.
    #[error("Engine not initialized: call initialize() before run()")]
    NotInitialized,

    /// Metric calculation requires more history than supplied.
    #[error("Insufficient history: {required} values required, got {actual}")]
    InsufficientHistory {
        /// Minimum number of values required.
        required: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Benchmark return series is misaligned with the portfolio returns.
    #[error("Benchmark length mismatch: {benchmark} benchmark returns for {returns} portfolio returns")]
    BenchmarkMismatch {
        /// Number of benchmark returns supplied.
        benchmark: usize,
        /// Number of portfolio returns derived from the value series.
        returns: usize,
    },

    /// Moving-average windows are degenerate.
    #[error("Invalid SMA windows: short {short} must be nonzero and less than long {long}")]
    InvalidWindows {
        /// Short moving-average window.
        short: usize,
        /// Long moving-average window.
        long: usize,
    },
}
