//! Headless simulation: seeded multi-day runs of the full loop
//! (expedition → loot → pricing → customer traffic) for balance analysis.

pub mod config;
pub mod report;
pub mod runner;

pub use config::SimConfig;
pub use report::{DayStats, SimReport};
pub use runner::run_simulation;
