//! Market data models shared across the engine.

mod bar;
mod signal;

pub use bar::{PriceBar, validate_series};
pub use signal::Signal;
