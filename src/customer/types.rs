use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::constants::INTEREST_CUTS;
use crate::items::types::{Quality, WareKind};

/// Broad archetype of a shop visitor. Governs budget, temperament, and how
/// many wares they bother to examine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerKind {
    Novice,
    Veteran,
    Noble,
    Merchant,
}

impl CustomerKind {
    pub const ALL: [CustomerKind; 4] = [
        CustomerKind::Novice,
        CustomerKind::Veteran,
        CustomerKind::Noble,
        CustomerKind::Merchant,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CustomerKind::Novice => "Novice",
            CustomerKind::Veteran => "Veteran",
            CustomerKind::Noble => "Noble",
            CustomerKind::Merchant => "Merchant",
        }
    }

    /// Base number of wares this archetype examines per visit.
    /// `None` means everything on display (merchants appraise it all).
    pub fn examine_limit(&self) -> Option<usize> {
        match self {
            CustomerKind::Novice => Some(2),
            CustomerKind::Veteran => Some(3),
            CustomerKind::Noble => Some(4),
            CustomerKind::Merchant => None,
        }
    }
}

/// Temperament knobs, each in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personality {
    /// How hard price deviations from fair value are felt.
    pub price_sensitivity: f64,
    /// Tendency to buy on the spot when interest is high.
    pub impulse_buying: f64,
    /// Willingness to haggle instead of paying the tag.
    pub negotiation_tendency: f64,
    /// How much a pretty ware sways the final verdict.
    pub aesthetic_appreciation: f64,
    /// Tolerance for dithering before walking out.
    pub patience: f64,
}

/// Spending range for one visit. `typical` is the comfortable purchase
/// size; `max` is the hard ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
    pub typical: f64,
}

impl BudgetRange {
    pub fn can_afford(&self, price: f64) -> bool {
        price <= self.max
    }

    pub fn comfortable_with(&self, price: f64) -> bool {
        price <= self.typical
    }
}

/// What a customer likes, as weights per ware kind plus a preferred
/// quality tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarePreferences {
    /// Per-kind appeal in `[0, 1]`; missing kinds read as indifferent (0.3).
    pub kind_weights: HashMap<WareKind, f64>,
    /// The tier this customer shops for; interest falls off with distance.
    pub quality_affinity: Quality,
}

impl WarePreferences {
    pub fn kind_score(&self, kind: WareKind) -> f64 {
        self.kind_weights.get(&kind).copied().unwrap_or(0.3) * 100.0
    }

    pub fn quality_score(&self, quality: Quality) -> f64 {
        let distance = (quality as i32 - self.quality_affinity as i32).abs() as f64;
        (100.0 - distance * 30.0).max(0.0)
    }
}

/// Five-level classification of how much a customer wants a ware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InterestLevel {
    NotInterested = 0,
    SlightlyInterested = 1,
    ModeratelyInterested = 2,
    HighlyInterested = 3,
    VeryInterested = 4,
}

impl InterestLevel {
    /// Buckets a 0-100 composite score through the ordered cut table.
    pub fn from_score(score: f64) -> Self {
        const BUCKETS: [InterestLevel; 4] = [
            InterestLevel::VeryInterested,
            InterestLevel::HighlyInterested,
            InterestLevel::ModeratelyInterested,
            InterestLevel::SlightlyInterested,
        ];
        for (cut, level) in INTEREST_CUTS.iter().zip(BUCKETS) {
            if score >= *cut {
                return level;
            }
        }
        InterestLevel::NotInterested
    }
}

/// Outcome of a purchase deliberation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseDecision {
    Buying,
    WantsToNegotiate,
    Considering,
    NotBuying,
}

/// Where the customer currently is in their visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerState {
    Browsing,
    Examining,
    Considering,
    Negotiating,
    Purchasing,
    Leaving,
}

/// One memoized ware evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ItemEvaluation {
    pub score: f64,
    pub interest: InterestLevel,
}
