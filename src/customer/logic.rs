//! Customer AI: interest scoring, purchase decisions, and negotiation.
//!
//! Evaluations are memoized per ware id for the customer's lifetime, so
//! re-examining the same ware returns the original verdict instead of a
//! re-roll. All randomness flows through the caller's `Rng`.

use std::collections::HashMap;

use rand::Rng;
use uuid::Uuid;

use crate::core::constants::*;
use crate::core::error::CustomerError;
use crate::customer::types::{
    BudgetRange, CustomerKind, CustomerState, InterestLevel, ItemEvaluation, Personality,
    PurchaseDecision, WarePreferences,
};
use crate::items::types::Ware;
use crate::market::types::{satisfaction_from_ratio, Satisfaction};

/// Offer multiplier per interest tier (NotInterested through
/// VeryInterested): keener customers open closer to the asking price.
const NEGOTIATION_INTEREST_MULTIPLIERS: [f64; 5] = [0.75, 0.78, 0.82, 0.87, 0.92];

/// Loyalty shift per satisfaction verdict, Outraged through Delighted.
const LOYALTY_DELTAS: [f64; 5] = [-10.0, -5.0, 1.0, 4.0, 8.0];

pub struct Customer {
    id: Uuid,
    name: String,
    kind: CustomerKind,
    personality: Personality,
    budget: BudgetRange,
    preferences: WarePreferences,
    loyalty: f64,
    state: CustomerState,
    evaluations: HashMap<Uuid, ItemEvaluation>,
    considering: Option<(Uuid, String)>,
}

impl Customer {
    pub fn new(
        name: String,
        kind: CustomerKind,
        personality: Personality,
        budget: BudgetRange,
        preferences: WarePreferences,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            personality,
            budget,
            preferences,
            loyalty: LOYALTY_START,
            state: CustomerState::Browsing,
            evaluations: HashMap::new(),
            considering: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CustomerKind {
        self.kind
    }

    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    pub fn budget(&self) -> &BudgetRange {
        &self.budget
    }

    pub fn preferences(&self) -> &WarePreferences {
        &self.preferences
    }

    pub fn loyalty(&self) -> f64 {
        self.loyalty
    }

    pub fn state(&self) -> CustomerState {
        self.state
    }

    pub fn set_state(&mut self, state: CustomerState) {
        self.state = state;
    }

    pub fn has_viewed(&self, ware_id: Uuid) -> bool {
        self.evaluations.contains_key(&ware_id)
    }

    pub fn wares_viewed(&self) -> usize {
        self.evaluations.len()
    }

    pub fn cached_interest(&self, ware_id: Uuid) -> Option<InterestLevel> {
        self.evaluations.get(&ware_id).map(|e| e.interest)
    }

    pub fn cached_score(&self, ware_id: Uuid) -> Option<f64> {
        self.evaluations.get(&ware_id).map(|e| e.score)
    }

    /// Scores a ware and buckets it into an interest tier.
    ///
    /// The first call rolls the evaluation and marks the ware viewed; every
    /// later call for the same ware id returns the cached verdict.
    pub fn evaluate_item(&mut self, ware: &Ware, price: f64, rng: &mut impl Rng) -> InterestLevel {
        if let Some(cached) = self.evaluations.get(&ware.id) {
            return cached.interest;
        }

        let kind_score = self.preferences.kind_score(ware.kind);
        let quality_score = self.preferences.quality_score(ware.quality);
        let price_score = self.price_evaluation(ware, price);

        let noise = rng.gen_range(-INTEREST_RANDOM_SPREAD..=INTEREST_RANDOM_SPREAD);
        let score = (kind_score * INTEREST_KIND_WEIGHT
            + quality_score * INTEREST_QUALITY_WEIGHT
            + price_score * INTEREST_PRICE_WEIGHT
            + noise)
            .clamp(0.0, 100.0);

        let evaluation = ItemEvaluation {
            score,
            interest: InterestLevel::from_score(score),
        };
        self.evaluations.insert(ware.id, evaluation);
        evaluation.interest
    }

    /// Price component of the interest score: the price-to-expected-value
    /// ratio through the ordered cut table, scaled by price sensitivity,
    /// then discounted as the price climbs past the comfortable range.
    fn price_evaluation(&self, ware: &Ware, price: f64) -> f64 {
        if !self.budget.can_afford(price) {
            return 0.0;
        }

        let expected = ware.appraised_value();
        let ratio = if expected > 0.0 { price / expected } else { 1.0 };

        let mut raw = PRICE_RATIO_SCORES[PRICE_RATIO_CUTS.len()];
        for (i, cut) in PRICE_RATIO_CUTS.iter().enumerate() {
            if ratio <= *cut {
                raw = PRICE_RATIO_SCORES[i];
                break;
            }
        }

        // An insensitive buyer barely registers a bad ratio.
        let gated = 100.0 - (100.0 - raw) * self.personality.price_sensitivity;

        let affordability = if self.budget.comfortable_with(price) {
            1.0
        } else {
            // Linear slide from 1.0 at the typical spend to 0.5 at the cap.
            let span = (self.budget.max - self.budget.typical).max(f64::EPSILON);
            1.0 - 0.5 * ((price - self.budget.typical) / span)
        };

        gated * affordability
    }

    /// Decides what to do about a ware at the given price, reusing the
    /// cached interest. Any outcome except NotBuying leaves the ware under
    /// consideration for `complete_purchase`.
    pub fn make_purchase_decision(
        &mut self,
        ware: &Ware,
        price: f64,
        rng: &mut impl Rng,
    ) -> PurchaseDecision {
        let interest = self.evaluate_item(ware, price, rng);

        if interest == InterestLevel::NotInterested || !self.budget.can_afford(price) {
            self.considering = None;
            self.state = CustomerState::Browsing;
            return PurchaseDecision::NotBuying;
        }

        let comfortable = self.budget.comfortable_with(price);
        let impulsive = self.personality.impulse_buying > IMPULSE_BUY_THRESHOLD;
        let haggler = self.personality.negotiation_tendency > NEGOTIATION_DECISION_THRESHOLD;

        let decision = match interest {
            InterestLevel::VeryInterested => {
                if comfortable || impulsive {
                    PurchaseDecision::Buying
                } else if haggler {
                    PurchaseDecision::WantsToNegotiate
                } else {
                    PurchaseDecision::Considering
                }
            }
            InterestLevel::HighlyInterested => {
                let draw = rng.gen_range(0.0..1.0);
                if comfortable
                    && (impulsive || draw < HIGH_INTEREST_BUY_CHANCE)
                {
                    PurchaseDecision::Buying
                } else if haggler {
                    PurchaseDecision::WantsToNegotiate
                } else {
                    PurchaseDecision::Considering
                }
            }
            InterestLevel::ModeratelyInterested => {
                let draw = rng.gen_range(0.0..1.0);
                if comfortable
                    && draw < MODERATE_BUY_BASE_CHANCE + self.personality.impulse_buying * 0.3
                {
                    PurchaseDecision::Buying
                } else if self.personality.negotiation_tendency > MODERATE_NEGOTIATE_TENDENCY
                    && rng.gen_range(0.0..1.0) < 0.5
                {
                    PurchaseDecision::WantsToNegotiate
                } else {
                    PurchaseDecision::Considering
                }
            }
            InterestLevel::SlightlyInterested => {
                let draw = rng.gen_range(0.0..1.0);
                if comfortable
                    && draw < SLIGHT_BUY_BASE_CHANCE + self.personality.impulse_buying * 0.2
                {
                    PurchaseDecision::Buying
                } else {
                    PurchaseDecision::NotBuying
                }
            }
            InterestLevel::NotInterested => unreachable!("handled above"),
        };

        match decision {
            PurchaseDecision::NotBuying => {
                self.considering = None;
                self.state = CustomerState::Browsing;
            }
            PurchaseDecision::Buying => {
                self.considering = Some((ware.id, ware.name.clone()));
                self.state = CustomerState::Purchasing;
            }
            PurchaseDecision::WantsToNegotiate => {
                self.considering = Some((ware.id, ware.name.clone()));
                self.state = CustomerState::Negotiating;
            }
            PurchaseDecision::Considering => {
                self.considering = Some((ware.id, ware.name.clone()));
                self.state = CustomerState::Considering;
            }
        }

        decision
    }

    /// Proposes a counter-offer, or `None` for customers who do not haggle.
    ///
    /// The offer opens at an interest-scaled fraction of the asking price
    /// with a little personal jitter, capped at 90% of asking and floored
    /// against 70% of the typical spend (never insultingly low), and never
    /// beyond the budget ceiling.
    pub fn attempt_negotiation(
        &mut self,
        ware: &Ware,
        asking_price: f64,
        rng: &mut impl Rng,
    ) -> Option<f64> {
        if self.personality.negotiation_tendency < NEGOTIATION_MIN_TENDENCY {
            return None;
        }

        let interest = self
            .cached_interest(ware.id)
            .unwrap_or(InterestLevel::ModeratelyInterested);
        let multiplier = NEGOTIATION_INTEREST_MULTIPLIERS[interest as usize];

        let jitter = rng.gen_range(-NEGOTIATION_JITTER..=NEGOTIATION_JITTER);
        let ceiling = asking_price * NEGOTIATION_CEILING_OF_ASKING;
        let floor = (self.budget.typical * NEGOTIATION_FLOOR_OF_TYPICAL).min(ceiling);

        let offer = (asking_price * multiplier * (1.0 + jitter))
            .clamp(floor, ceiling)
            .min(self.budget.max);

        self.state = CustomerState::Negotiating;
        Some(crate::market::pricing::round_to_denomination(offer))
    }

    /// How this customer would feel paying `price` for the ware. Pure; used
    /// to settle satisfaction before the sale is committed.
    pub fn satisfaction_with(&self, ware: &Ware, price: f64) -> Satisfaction {
        let expected = ware.appraised_value();
        let ratio = if expected > 0.0 { price / expected } else { 1.0 };
        let effective = 1.0 + (ratio - 1.0) * self.personality.price_sensitivity;
        let base = satisfaction_from_ratio(effective);

        let mut level = base as i32;
        if let Some(eval) = self.evaluations.get(&ware.id) {
            if eval.score >= 80.0 {
                level += 1;
            }
        }
        if ware.appeal * self.personality.aesthetic_appreciation >= 0.5 {
            level += 1;
        }

        match level.clamp(0, 4) {
            0 => Satisfaction::Outraged,
            1 => Satisfaction::Disappointed,
            2 => Satisfaction::Neutral,
            3 => Satisfaction::Pleased,
            _ => Satisfaction::Delighted,
        }
    }

    /// Finalizes the purchase of the ware under consideration.
    ///
    /// Errs if `ware` is not the one this customer is considering; that is
    /// a caller bug, not a shopping outcome.
    pub fn complete_purchase(
        &mut self,
        ware: &Ware,
        price: f64,
    ) -> Result<Satisfaction, CustomerError> {
        match &self.considering {
            Some((id, _)) if *id == ware.id => {}
            other => {
                return Err(CustomerError::WrongWareFinalized {
                    finalized: ware.name.clone(),
                    considering: other.as_ref().map(|(_, name)| name.clone()),
                });
            }
        }

        let satisfaction = self.satisfaction_with(ware, price);

        let delta = LOYALTY_DELTAS[satisfaction as usize];
        self.loyalty = (self.loyalty + delta).clamp(LOYALTY_MIN, LOYALTY_MAX);

        self.considering = None;
        self.state = CustomerState::Purchasing;
        Ok(satisfaction)
    }
}
