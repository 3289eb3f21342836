//! Simulation configuration.

use crate::core::constants::DEFAULT_DISPLAY_SLOTS;
use crate::market::types::PricingStrategy;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of in-game days to simulate
    pub days: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Customers visiting per day, before the daily wobble
    pub customers_per_day: usize,

    /// Shop-front display slots
    pub display_slots: usize,

    /// Opening treasury balance
    pub starting_gold: f64,

    /// Default pricing strategy for every ware kind
    pub strategy: PricingStrategy,

    /// Safety cap on combat ticks per expedition
    pub max_ticks_per_expedition: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-day detail)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days: 30,
            seed: None,
            customers_per_day: 8,
            display_slots: DEFAULT_DISPLAY_SLOTS,
            starting_gold: 200.0,
            strategy: PricingStrategy::Competitive,
            max_ticks_per_expedition: 100_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for testing pricing strategies against each other.
    pub fn strategy_trial(strategy: PricingStrategy, days: u32) -> Self {
        Self {
            days,
            strategy,
            ..Default::default()
        }
    }

    /// Quick config for a short smoke run.
    pub fn smoke_test(seed: u64) -> Self {
        Self {
            days: 5,
            seed: Some(seed),
            customers_per_day: 5,
            verbosity: 0,
            ..Default::default()
        }
    }
}
