//! One customer's end-to-end shop visit.
//!
//! The session walks Entering → Browsing → Examining → Considering →
//! {Negotiating → Purchasing | Purchasing | Leaving} → Leaving, suspending
//! only at simulated "thinking time" delays. Instant mode skips every delay
//! so tests and the headless simulator run flat out. Cancellation is
//! cooperative: a cancelled token stops the session before its next delay,
//! never mid-calculation.
//!
//! Negotiation acceptance uses a flat rule: the shop takes any offer within
//! 20% of the asking price. This stands in for the shopkeeper's own haggling
//! and is the hook where a player decision would slot in.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::constants::*;
use crate::customer::logic::Customer;
use crate::customer::types::{CustomerKind, CustomerState, InterestLevel, PurchaseDecision};
use crate::items::types::Ware;
use crate::market::types::Satisfaction;
use crate::shop::manager::ShopManager;
use crate::shop::types::SaleTransaction;

/// Where a session is in its walk through the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoppingPhase {
    Entering,
    Browsing,
    Examining,
    Considering,
    Negotiating,
    Purchasing,
    Leaving,
}

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Skip all thinking delays (tests and headless simulation).
    pub instant: bool,
    /// Seed for this session's private RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Everything that happened during one visit.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_kind: CustomerKind,
    pub wares_examined: usize,
    pub purchase: Option<SaleTransaction>,
    pub satisfaction: Option<Satisfaction>,
    pub negotiated: bool,
    pub cancelled: bool,
}

pub struct ShoppingSession {
    customer: Customer,
    shop: Arc<ShopManager>,
    config: SessionConfig,
    cancel: CancellationToken,
    rng: StdRng,
    phase: ShoppingPhase,
    wares_examined: usize,
    negotiated: bool,
}

impl ShoppingSession {
    pub fn new(
        customer: Customer,
        shop: Arc<ShopManager>,
        config: SessionConfig,
        cancel: CancellationToken,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            customer,
            shop,
            config,
            cancel,
            rng,
            phase: ShoppingPhase::Entering,
            wares_examined: 0,
            negotiated: false,
        }
    }

    pub fn phase(&self) -> ShoppingPhase {
        self.phase
    }

    /// Runs the visit to completion and consumes the session.
    pub async fn run(mut self) -> SessionOutcome {
        debug!(customer = %self.customer.name(), "entering shop");
        self.phase = ShoppingPhase::Entering;
        if !self.think().await {
            return self.finish(None, None, true);
        }

        let Some((slot_id, ware, price)) = self.browse().await else {
            let cancelled = self.cancel.is_cancelled();
            return self.finish(None, None, cancelled);
        };

        self.phase = ShoppingPhase::Considering;
        self.customer.set_state(CustomerState::Considering);
        if !self.think().await {
            return self.finish(None, None, true);
        }

        let decision = self
            .customer
            .make_purchase_decision(&ware, price, &mut self.rng);
        debug!(
            customer = %self.customer.name(),
            ware = %ware.name,
            ?decision,
            "purchase deliberation settled"
        );

        match decision {
            PurchaseDecision::Buying => self.purchase(slot_id, &ware, price).await,
            PurchaseDecision::WantsToNegotiate => self.negotiate(slot_id, &ware, price).await,
            PurchaseDecision::Considering => self.mull_it_over(slot_id, &ware, price).await,
            PurchaseDecision::NotBuying => self.finish(None, None, false),
        }
    }

    /// Walks the display, examining the most promising wares first.
    /// Returns the single best candidate worth pursuing, if any.
    async fn browse(&mut self) -> Option<(usize, Ware, f64)> {
        self.phase = ShoppingPhase::Browsing;
        self.customer.set_state(CustomerState::Browsing);

        let mut displayed = self.shop.displayed_wares();
        if displayed.is_empty() {
            debug!(customer = %self.customer.name(), "nothing on display");
            return None;
        }

        // Most appealing wares first, by the customer's own tastes.
        let prefs = self.customer.preferences().clone();
        displayed.sort_by(|a, b| {
            let score = |w: &Ware| prefs.kind_score(w.kind) * 0.6 + prefs.quality_score(w.quality) * 0.4;
            score(&b.1)
                .partial_cmp(&score(&a.1))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let examine_count = match self.customer.kind().examine_limit() {
            Some(base) => {
                let wobble: i64 = self.rng.gen_range(-1..=1);
                (base as i64 + wobble).max(1) as usize
            }
            None => displayed.len(),
        };

        let mut focus: Option<(usize, Ware, f64)> = None;
        let mut candidates: Vec<(usize, Ware, f64, InterestLevel)> = Vec::new();

        for (slot_id, ware, price) in displayed.into_iter().take(examine_count) {
            self.phase = ShoppingPhase::Examining;
            self.customer.set_state(CustomerState::Examining);
            if !self.think().await {
                return None;
            }

            let interest = self.customer.evaluate_item(&ware, price, &mut self.rng);
            self.wares_examined += 1;
            debug!(
                customer = %self.customer.name(),
                ware = %ware.name,
                ?interest,
                "examined ware"
            );

            let hooked = interest >= InterestLevel::HighlyInterested
                && self.rng.gen_range(0.0..1.0) < EXAMINE_FOCUS_CHANCE;
            candidates.push((slot_id, ware.clone(), price, interest));
            if hooked {
                focus = Some((slot_id, ware, price));
                break;
            }
        }

        if let Some(found) = focus {
            return Some(found);
        }

        // Pursue the strongest candidate that is at least slightly tempting.
        candidates
            .into_iter()
            .filter(|(_, _, _, interest)| *interest >= InterestLevel::SlightlyInterested)
            .max_by(|a, b| {
                let score = |c: &(usize, Ware, f64, InterestLevel)| {
                    self.customer.cached_score(c.1.id).unwrap_or(0.0)
                };
                score(a).partial_cmp(&score(b)).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(slot_id, ware, price, _)| (slot_id, ware, price))
    }

    /// Thinks a while longer, then either commits at the asking price or
    /// walks away.
    async fn mull_it_over(
        mut self,
        slot_id: usize,
        ware: &Ware,
        price: f64,
    ) -> SessionOutcome {
        if !self.think().await {
            return self.finish(None, None, true);
        }

        let chance = CONSIDER_FINAL_BUY_BASE_CHANCE
            + self.customer.personality().impulse_buying * 0.3;
        if self.rng.gen_range(0.0..1.0) < chance {
            self.purchase(slot_id, ware, price).await
        } else {
            debug!(customer = %self.customer.name(), "thought better of it");
            self.finish(None, None, false)
        }
    }

    /// Haggles over the asking price. The shop accepts any discount within
    /// the configured cap; a refused offer ends the visit.
    async fn negotiate(mut self, slot_id: usize, ware: &Ware, price: f64) -> SessionOutcome {
        self.phase = ShoppingPhase::Negotiating;
        self.negotiated = true;
        if !self.think().await {
            return self.finish(None, None, true);
        }

        let Some(offer) = self.customer.attempt_negotiation(ware, price, &mut self.rng) else {
            // No stomach for haggling after all; fall back to dithering.
            return self.mull_it_over(slot_id, ware, price).await;
        };

        let discount = 1.0 - offer / price;
        if discount <= NEGOTIATION_MAX_DISCOUNT {
            debug!(
                customer = %self.customer.name(),
                offer,
                asking = price,
                "offer accepted"
            );
            self.purchase(slot_id, ware, offer).await
        } else {
            debug!(
                customer = %self.customer.name(),
                offer,
                asking = price,
                "offer refused"
            );
            self.finish(None, None, false)
        }
    }

    /// Commits the sale. A `None` from the shop means another customer got
    /// there first; the session shrugs and leaves.
    async fn purchase(mut self, slot_id: usize, ware: &Ware, price: f64) -> SessionOutcome {
        self.phase = ShoppingPhase::Purchasing;
        self.customer.set_state(CustomerState::Purchasing);
        if !self.think().await {
            return self.finish(None, None, true);
        }

        let satisfaction = self.customer.satisfaction_with(ware, price);
        let Some(transaction) =
            self.shop
                .process_sale(slot_id, self.customer.id(), price, satisfaction)
        else {
            debug!(
                customer = %self.customer.name(),
                ware = %ware.name,
                "ware gone before purchase"
            );
            return self.finish(None, None, false);
        };

        match self.customer.complete_purchase(ware, price) {
            Ok(felt) => self.finish(Some(transaction), Some(felt), false),
            Err(error) => {
                // The sale is already booked; this is a session bug, not a
                // recoverable shopping outcome.
                warn!(%error, "purchase finalized for unexpected ware");
                self.finish(Some(transaction), Some(satisfaction), false)
            }
        }
    }

    fn finish(
        mut self,
        purchase: Option<SaleTransaction>,
        satisfaction: Option<Satisfaction>,
        cancelled: bool,
    ) -> SessionOutcome {
        self.phase = ShoppingPhase::Leaving;
        self.customer.set_state(CustomerState::Leaving);
        debug!(
            customer = %self.customer.name(),
            bought = purchase.is_some(),
            cancelled,
            "leaving shop"
        );
        SessionOutcome {
            customer_id: self.customer.id(),
            customer_name: self.customer.name().to_string(),
            customer_kind: self.customer.kind(),
            wares_examined: self.wares_examined,
            purchase,
            satisfaction,
            negotiated: self.negotiated,
            cancelled,
        }
    }

    /// Simulated thinking time. Returns `false` if the session was
    /// cancelled before the delay could start; a delay already underway is
    /// never interrupted.
    async fn think(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        if self.config.instant {
            return true;
        }
        let millis = self.rng.gen_range(THINK_DELAY_MIN_MS..=THINK_DELAY_MAX_MS);
        tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
        true
    }
}
