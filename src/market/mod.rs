//! Market simulation and the pricing engine.

pub mod pricing;
pub mod types;

pub use pricing::{PricingConfig, PricingEngine};
pub use types::{MarketCondition, MarketData, PricingStrategy, Satisfaction, Season};
