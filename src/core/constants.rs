// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const REGEN_FRACTION_PER_SECOND: f64 = 0.10;

// Combatant stat variance applied on generation
pub const COMBATANT_STAT_VARIANCE_MIN: f64 = 0.9;
pub const COMBATANT_STAT_VARIANCE_MAX: f64 = 1.1;
pub const DEFAULT_RETREAT_THRESHOLD: f64 = 0.2;

// Monster base stats per expedition depth: (base_hp, hp_step, base_dps, dps_step)
// Index 0 = depth 1. Depths beyond the table reuse the last row.
pub const DEPTH_MONSTER_STATS: [(f64, f64, f64, f64); 6] = [
    (40.0, 8.0, 4.0, 1.0),
    (70.0, 12.0, 7.0, 1.5),
    (120.0, 18.0, 11.0, 2.0),
    (190.0, 25.0, 16.0, 2.5),
    (280.0, 34.0, 23.0, 3.0),
    (400.0, 45.0, 31.0, 4.0),
];
pub const BOSS_MONSTER_MULTIPLIERS: (f64, f64) = (2.5, 1.5);

// Adventurer base stats per experience rank
pub const ADVENTURER_BASE_HP: f64 = 100.0;
pub const ADVENTURER_HP_PER_RANK: f64 = 25.0;
pub const ADVENTURER_BASE_DPS: f64 = 10.0;
pub const ADVENTURER_DPS_PER_RANK: f64 = 3.0;

// Ware base prices per kind
pub const WEAPON_BASE_PRICE: f64 = 45.0;
pub const ARMOR_BASE_PRICE: f64 = 38.0;
pub const JEWELRY_BASE_PRICE: f64 = 60.0;
pub const POTION_BASE_PRICE: f64 = 8.0;
pub const RELIC_BASE_PRICE: f64 = 120.0;
pub const WARE_PRICE_VARIANCE_MIN: f64 = 0.85;
pub const WARE_PRICE_VARIANCE_MAX: f64 = 1.15;

// Loot
pub const MONSTER_DROP_CHANCE: f64 = 0.35;
pub const BOSS_DROP_GUARANTEED: bool = true;

// Pricing: quality multipliers, Common through Legendary (strictly increasing)
pub const QUALITY_PRICE_MULTIPLIERS: [f64; 5] = [1.0, 1.25, 1.6, 2.1, 3.0];

// Pricing: volatility and clamping
pub const PRICE_VOLATILITY: f64 = 0.05;
pub const MIN_PRICE_DECREASE: f64 = 0.5;
pub const MAX_PRICE_INCREASE: f64 = 3.0;

// Pricing: strategy multipliers
pub const PREMIUM_MULTIPLIER: f64 = 1.3;
pub const COMPETITIVE_MULTIPLIER: f64 = 0.95;
pub const DISCOUNT_MULTIPLIER: f64 = 0.8;
pub const PENETRATION_MULTIPLIER: f64 = 0.7;
pub const SKIMMING_BASE_MULTIPLIER: f64 = 1.5;
pub const SKIMMING_DECAY_PER_SALE: f64 = 0.97;
pub const SKIMMING_FLOOR: f64 = 1.0;
pub const SEASONAL_PEAK_MULTIPLIER: f64 = 1.2;
pub const SEASONAL_OFF_MULTIPLIER: f64 = 0.9;
pub const DYNAMIC_DEMAND_WEIGHT: f64 = 0.5;

// Market data bounds and relaxation
pub const DEMAND_SUPPLY_MIN: f64 = 0.5;
pub const DEMAND_SUPPLY_MAX: f64 = 2.0;
pub const MARKET_RELAX_PER_HOUR: f64 = 0.92;
pub const DEMAND_BUMP_ON_SALE: f64 = 0.04;
pub const SUPPLY_BUMP_ON_SALE: f64 = 0.02;
pub const TIME_TO_SELL_SMOOTHING: f64 = 0.3;

// Competitor simulation
pub const COMPETITOR_MULT_MIN: f64 = 0.7;
pub const COMPETITOR_MULT_MAX: f64 = 1.5;
pub const COMPETITOR_RAISE_THRESHOLD: f64 = 1.2;
pub const COMPETITOR_LOWER_THRESHOLD: f64 = 0.8;
pub const COMPETITOR_NUDGE_STEP: f64 = 0.05;

// Customer interest score weights (must sum to 1.0)
pub const INTEREST_KIND_WEIGHT: f64 = 0.4;
pub const INTEREST_QUALITY_WEIGHT: f64 = 0.3;
pub const INTEREST_PRICE_WEIGHT: f64 = 0.3;
pub const INTEREST_RANDOM_SPREAD: f64 = 10.0;

// Price evaluation: price-to-expected-value ratio cut points and scores
pub const PRICE_RATIO_CUTS: [f64; 5] = [0.7, 0.9, 1.1, 1.3, 1.5];
pub const PRICE_RATIO_SCORES: [f64; 6] = [100.0, 85.0, 65.0, 45.0, 25.0, 10.0];

// Interest bucketing cut points (score of 100)
pub const INTEREST_CUTS: [f64; 4] = [80.0, 60.0, 40.0, 20.0];

// Purchase decision thresholds
pub const IMPULSE_BUY_THRESHOLD: f64 = 0.6;
pub const NEGOTIATION_DECISION_THRESHOLD: f64 = 0.4;
pub const NEGOTIATION_MIN_TENDENCY: f64 = 0.3;
pub const HIGH_INTEREST_BUY_CHANCE: f64 = 0.7;
pub const MODERATE_BUY_BASE_CHANCE: f64 = 0.4;
pub const MODERATE_NEGOTIATE_TENDENCY: f64 = 0.5;
pub const SLIGHT_BUY_BASE_CHANCE: f64 = 0.15;
pub const CONSIDER_FINAL_BUY_BASE_CHANCE: f64 = 0.35;

// Negotiation offer shaping
pub const NEGOTIATION_CEILING_OF_ASKING: f64 = 0.9;
pub const NEGOTIATION_FLOOR_OF_TYPICAL: f64 = 0.7;
pub const NEGOTIATION_JITTER: f64 = 0.05;

// Session
pub const NEGOTIATION_MAX_DISCOUNT: f64 = 0.20;
pub const EXAMINE_FOCUS_CHANCE: f64 = 0.7;
pub const THINK_DELAY_MIN_MS: u64 = 300;
pub const THINK_DELAY_MAX_MS: u64 = 1200;

// Loyalty
pub const LOYALTY_START: f64 = 50.0;
pub const LOYALTY_MIN: f64 = 0.0;
pub const LOYALTY_MAX: f64 = 100.0;

// Shop
pub const DEFAULT_DISPLAY_SLOTS: usize = 8;
pub const COST_ESTIMATE_RATIO: f64 = 0.6;
pub const SHOP_EVENT_CAPACITY: usize = 64;

// Traffic level evaluation window
pub const TRAFFIC_RECENT_SAMPLES: usize = 5;
