use serde::{Deserialize, Serialize};

use crate::items::types::{Quality, WareKind};

/// Broad mood of the market for one (kind, quality) segment, derived from
/// the demand level via [`MarketCondition::from_demand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketCondition {
    Depressed,
    Slow,
    Steady,
    Active,
    Booming,
}

/// Ordered cut points mapping a demand level to a market condition.
/// First row whose bound the demand reaches wins.
const CONDITION_CUTS: [(f64, MarketCondition); 4] = [
    (1.5, MarketCondition::Booming),
    (1.15, MarketCondition::Active),
    (0.85, MarketCondition::Steady),
    (0.6, MarketCondition::Slow),
];

impl MarketCondition {
    pub fn from_demand(demand_level: f64) -> Self {
        for (bound, condition) in CONDITION_CUTS {
            if demand_level >= bound {
                return condition;
            }
        }
        MarketCondition::Depressed
    }

    /// Scales the effective price ratio in satisfaction prediction: a hot
    /// market tolerates higher prices, a depressed one punishes them.
    pub fn price_tolerance_modifier(&self) -> f64 {
        match self {
            MarketCondition::Booming => 0.9,
            MarketCondition::Active => 0.95,
            MarketCondition::Steady => 1.0,
            MarketCondition::Slow => 1.05,
            MarketCondition::Depressed => 1.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn next(&self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }
}

/// Named policy turning market signals into a price multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingStrategy {
    Premium,
    Competitive,
    Discount,
    Dynamic,
    Seasonal,
    Penetration,
    Skimming,
}

/// Five-level customer satisfaction, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Satisfaction {
    Outraged = 0,
    Disappointed = 1,
    Neutral = 2,
    Pleased = 3,
    Delighted = 4,
}

impl Satisfaction {
    pub fn name(&self) -> &'static str {
        match self {
            Satisfaction::Outraged => "Outraged",
            Satisfaction::Disappointed => "Disappointed",
            Satisfaction::Neutral => "Neutral",
            Satisfaction::Pleased => "Pleased",
            Satisfaction::Delighted => "Delighted",
        }
    }
}

/// Ordered cut points mapping an effective price ratio to satisfaction.
/// First row whose bound the ratio stays under wins; above the last bound
/// the verdict is Outraged.
pub(crate) const SATISFACTION_CUTS: [(f64, Satisfaction); 4] = [
    (0.85, Satisfaction::Delighted),
    (1.0, Satisfaction::Pleased),
    (1.15, Satisfaction::Neutral),
    (1.35, Satisfaction::Disappointed),
];

pub(crate) fn satisfaction_from_ratio(effective_ratio: f64) -> Satisfaction {
    for (bound, satisfaction) in SATISFACTION_CUTS {
        if effective_ratio <= bound {
            return satisfaction;
        }
    }
    Satisfaction::Outraged
}

/// Per-(kind, quality) market record. Created lazily on first price query
/// and kept for the life of the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    pub kind: WareKind,
    pub quality: Quality,
    /// Demand pressure around a neutral 1.0.
    pub demand_level: f64,
    /// Supply pressure around a neutral 1.0.
    pub supply_level: f64,
    /// What competing shops charge relative to the fair price.
    pub competitor_price_multiplier: f64,
    pub condition: MarketCondition,
    pub season: Season,
    pub recent_sales_count: u32,
    /// Smoothed hours a ware of this segment sits on display before selling.
    pub average_time_to_sell: f64,
}

impl MarketData {
    pub fn new(kind: WareKind, quality: Quality, season: Season) -> Self {
        Self {
            kind,
            quality,
            demand_level: 1.0,
            supply_level: 1.0,
            competitor_price_multiplier: 1.0,
            condition: MarketCondition::Steady,
            season,
            recent_sales_count: 0,
            average_time_to_sell: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_from_demand_buckets() {
        assert_eq!(MarketCondition::from_demand(1.8), MarketCondition::Booming);
        assert_eq!(MarketCondition::from_demand(1.5), MarketCondition::Booming);
        assert_eq!(MarketCondition::from_demand(1.2), MarketCondition::Active);
        assert_eq!(MarketCondition::from_demand(1.0), MarketCondition::Steady);
        assert_eq!(MarketCondition::from_demand(0.7), MarketCondition::Slow);
        assert_eq!(MarketCondition::from_demand(0.4), MarketCondition::Depressed);
    }

    #[test]
    fn test_satisfaction_cuts_are_monotone() {
        assert_eq!(satisfaction_from_ratio(0.5), Satisfaction::Delighted);
        assert_eq!(satisfaction_from_ratio(0.85), Satisfaction::Delighted);
        assert_eq!(satisfaction_from_ratio(0.95), Satisfaction::Pleased);
        assert_eq!(satisfaction_from_ratio(1.1), Satisfaction::Neutral);
        assert_eq!(satisfaction_from_ratio(1.3), Satisfaction::Disappointed);
        assert_eq!(satisfaction_from_ratio(1.5), Satisfaction::Outraged);
    }

    #[test]
    fn test_season_cycle() {
        let mut season = Season::Spring;
        for _ in 0..4 {
            season = season.next();
        }
        assert_eq!(season, Season::Spring);
    }

    #[test]
    fn test_new_market_is_neutral() {
        let market = MarketData::new(WareKind::Potion, Quality::Common, Season::Spring);
        assert_eq!(market.demand_level, 1.0);
        assert_eq!(market.supply_level, 1.0);
        assert_eq!(market.competitor_price_multiplier, 1.0);
        assert_eq!(market.condition, MarketCondition::Steady);
        assert_eq!(market.recent_sales_count, 0);
    }
}
