//! Market-responsive price calculation.
//!
//! An asking price is the product of four factors: the market factor
//! (demand over supply, times the competitor multiplier), the strategy
//! multiplier, the quality-tier multiplier, and a bounded random volatility
//! term. The product is clamped and then rounded to a denomination
//! appropriate for its magnitude.

use std::collections::HashMap;

use rand::Rng;

use crate::core::constants::*;
use crate::items::types::{Quality, Ware, WareKind};
use crate::market::types::{
    satisfaction_from_ratio, MarketCondition, MarketData, PricingStrategy, Satisfaction, Season,
};

#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub default_strategy: PricingStrategy,
    pub competitor_simulation: bool,
    pub season: Season,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_strategy: PricingStrategy::Competitive,
            competitor_simulation: true,
            season: Season::Spring,
        }
    }
}

/// Season in which a ware kind commands its best prices.
fn peak_season(kind: WareKind) -> Season {
    match kind {
        WareKind::Weapon => Season::Summer,
        WareKind::Armor => Season::Winter,
        WareKind::Jewelry => Season::Spring,
        WareKind::Potion => Season::Autumn,
        WareKind::Relic => Season::Summer,
    }
}

/// Rounds a price to the increment customers expect at that magnitude:
/// cents below 10, tenths below 100, whole units below 1000, and 5-unit
/// steps above that.
pub fn round_to_denomination(price: f64) -> f64 {
    if price < 10.0 {
        (price * 100.0).round() / 100.0
    } else if price < 100.0 {
        (price * 10.0).round() / 10.0
    } else if price < 1000.0 {
        price.round()
    } else {
        (price / 5.0).round() * 5.0
    }
}

/// Owns all [`MarketData`] records, keyed by (kind, quality). Records are
/// created lazily on first price query and live for the engine's lifetime.
pub struct PricingEngine {
    config: PricingConfig,
    strategies: HashMap<WareKind, PricingStrategy>,
    markets: HashMap<(WareKind, Quality), MarketData>,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self {
            config,
            strategies: HashMap::new(),
            markets: HashMap::new(),
        }
    }

    pub fn season(&self) -> Season {
        self.config.season
    }

    pub fn advance_season(&mut self) {
        self.config.season = self.config.season.next();
        let season = self.config.season;
        for market in self.markets.values_mut() {
            market.season = season;
        }
    }

    /// Overrides the pricing strategy for one ware kind.
    pub fn set_strategy(&mut self, kind: WareKind, strategy: PricingStrategy) {
        self.strategies.insert(kind, strategy);
    }

    pub fn strategy_for(&self, kind: WareKind) -> PricingStrategy {
        self.strategies
            .get(&kind)
            .copied()
            .unwrap_or(self.config.default_strategy)
    }

    pub fn market_snapshot(&self, kind: WareKind, quality: Quality) -> Option<&MarketData> {
        self.markets.get(&(kind, quality))
    }

    fn market_mut(&mut self, kind: WareKind, quality: Quality) -> &mut MarketData {
        let season = self.config.season;
        self.markets
            .entry((kind, quality))
            .or_insert_with(|| MarketData::new(kind, quality, season))
    }

    /// Computes an asking price for a ware given its kind-level base price.
    ///
    /// Deterministic up to the bounded volatility draw from `rng`. Negative
    /// base prices are passed through the same arithmetic unguarded.
    pub fn calculate_optimal_price(
        &mut self,
        ware: &Ware,
        base_price: f64,
        rng: &mut impl Rng,
    ) -> f64 {
        let strategy = self.strategy_for(ware.kind);
        let season = self.config.season;
        let market = self.market_mut(ware.kind, ware.quality);

        let market_factor =
            market.demand_level / market.supply_level * market.competitor_price_multiplier;
        let strategy_factor = strategy_multiplier(strategy, market, season);
        let quality_factor = ware.quality.price_multiplier();
        let volatility =
            rng.gen_range((1.0 - PRICE_VOLATILITY)..(1.0 + PRICE_VOLATILITY));

        let combined = (market_factor * strategy_factor * quality_factor * volatility)
            .clamp(MIN_PRICE_DECREASE, MAX_PRICE_INCREASE);

        round_to_denomination(base_price * combined)
    }

    /// Records a completed sale: bumps sale counters and demand, smooths the
    /// time-to-sell average, and advances the competitor simulation.
    pub fn record_sale(
        &mut self,
        ware: &Ware,
        sale_price: f64,
        hours_on_display: f64,
        satisfaction: Satisfaction,
    ) {
        let competitor_simulation = self.config.competitor_simulation;
        let appraised = ware.appraised_value();
        let market = self.market_mut(ware.kind, ware.quality);

        market.recent_sales_count += 1;

        // A sale is a demand signal; a happy buyer amplifies it.
        let mut demand_bump = DEMAND_BUMP_ON_SALE;
        if satisfaction >= Satisfaction::Pleased {
            demand_bump += DEMAND_BUMP_ON_SALE * 0.5;
        }
        market.demand_level =
            (market.demand_level + demand_bump).clamp(DEMAND_SUPPLY_MIN, DEMAND_SUPPLY_MAX);
        market.supply_level =
            (market.supply_level - SUPPLY_BUMP_ON_SALE).clamp(DEMAND_SUPPLY_MIN, DEMAND_SUPPLY_MAX);

        if market.average_time_to_sell == 0.0 {
            market.average_time_to_sell = hours_on_display;
        } else {
            market.average_time_to_sell = market.average_time_to_sell
                * (1.0 - TIME_TO_SELL_SMOOTHING)
                + hours_on_display * TIME_TO_SELL_SMOOTHING;
        }

        if competitor_simulation && appraised > 0.0 {
            let ratio = sale_price / appraised;
            if ratio > COMPETITOR_RAISE_THRESHOLD {
                market.competitor_price_multiplier += COMPETITOR_NUDGE_STEP;
            } else if ratio < COMPETITOR_LOWER_THRESHOLD {
                market.competitor_price_multiplier -= COMPETITOR_NUDGE_STEP;
            }
            market.competitor_price_multiplier = market
                .competitor_price_multiplier
                .clamp(COMPETITOR_MULT_MIN, COMPETITOR_MULT_MAX);
        }

        market.condition = MarketCondition::from_demand(market.demand_level);
    }

    /// Relaxes every market toward neutral as simulated hours pass.
    ///
    /// Demand, supply, and the competitor multiplier all decay
    /// exponentially toward 1.0; the recent-sales counter decays with the
    /// same factor so Skimming prices recover over time.
    pub fn update_market_conditions(&mut self, hours_passed: f64) {
        if hours_passed <= 0.0 {
            return;
        }
        let factor = MARKET_RELAX_PER_HOUR.powf(hours_passed);

        for market in self.markets.values_mut() {
            market.demand_level = 1.0 + (market.demand_level - 1.0) * factor;
            market.supply_level = 1.0 + (market.supply_level - 1.0) * factor;
            market.competitor_price_multiplier =
                1.0 + (market.competitor_price_multiplier - 1.0) * factor;
            market.recent_sales_count = (market.recent_sales_count as f64 * factor) as u32;
            market.condition = MarketCondition::from_demand(market.demand_level);
        }
    }

    /// Predicts how a buyer with the given price sensitivity would feel
    /// about a proposed price, given current market conditions.
    pub fn predict_satisfaction(
        &self,
        ware: &Ware,
        proposed_price: f64,
        base_price: f64,
        price_sensitivity: f64,
    ) -> Satisfaction {
        let expected = base_price * ware.quality.price_multiplier();
        if expected <= 0.0 {
            return Satisfaction::Neutral;
        }

        let tolerance = self
            .market_snapshot(ware.kind, ware.quality)
            .map(|m| m.condition.price_tolerance_modifier())
            .unwrap_or(1.0);

        let ratio = proposed_price / expected * tolerance;
        // Sensitivity scales how far the ratio is felt from fair price.
        let effective = 1.0 + (ratio - 1.0) * price_sensitivity;
        satisfaction_from_ratio(effective)
    }
}

fn strategy_multiplier(
    strategy: PricingStrategy,
    market: &MarketData,
    season: Season,
) -> f64 {
    match strategy {
        PricingStrategy::Premium => PREMIUM_MULTIPLIER,
        PricingStrategy::Competitive => COMPETITIVE_MULTIPLIER,
        PricingStrategy::Discount => DISCOUNT_MULTIPLIER,
        PricingStrategy::Penetration => PENETRATION_MULTIPLIER,
        PricingStrategy::Dynamic => {
            1.0 + (market.demand_level - 1.0) * DYNAMIC_DEMAND_WEIGHT
        }
        PricingStrategy::Seasonal => {
            if season == peak_season(market.kind) {
                SEASONAL_PEAK_MULTIPLIER
            } else {
                SEASONAL_OFF_MULTIPLIER
            }
        }
        PricingStrategy::Skimming => (SKIMMING_BASE_MULTIPLIER
            * SKIMMING_DECAY_PER_SALE.powi(market.recent_sales_count as i32))
        .max(SKIMMING_FLOOR),
    }
}
