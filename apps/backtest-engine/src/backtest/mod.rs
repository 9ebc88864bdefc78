//! Deterministic bar-by-bar portfolio simulation.
//!
//! The engine replays a price series against an aligned signal series and
//! folds cash/position state forward one bar at a time. Identical inputs
//! always produce identical outputs: there is no randomness, no clock, and
//! no I/O anywhere in the replay path.

mod engine;
mod parallel;
mod position;
mod result;

pub use engine::SimulationEngine;
pub use parallel::{BacktestJob, BatchRunner, JobResult, simulate};
pub use position::Position;
pub use result::{AugmentedBar, BacktestRun};
