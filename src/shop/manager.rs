//! Shop state and its atomic per-call operations.
//!
//! Concurrent shopping sessions all talk to one `ShopManager`. Every public
//! operation takes the internal lock once, applies completely or not at all,
//! and releases before any notification goes out. Two sessions racing for
//! the same slot therefore resolve cleanly: the first caller wins, the loser
//! sees `false`/`None` and treats the ware as unavailable.

use std::sync::Mutex;

use chrono::Utc;
use rand::Rng;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::constants::{COST_ESTIMATE_RATIO, SHOP_EVENT_CAPACITY};
use crate::items::types::{Quality, Ware, WareKind};
use crate::market::pricing::{PricingConfig, PricingEngine};
use crate::market::types::{MarketData, PricingStrategy, Satisfaction};
use crate::shop::types::{DisplaySlot, SaleTransaction, ShopEvent, Treasury};

struct ShopState {
    slots: Vec<DisplaySlot>,
    transactions: Vec<SaleTransaction>,
    treasury: Treasury,
    pricing: PricingEngine,
}

pub struct ShopManager {
    state: Mutex<ShopState>,
    events: broadcast::Sender<ShopEvent>,
}

impl ShopManager {
    pub fn new(slot_count: usize, starting_gold: f64, pricing: PricingConfig) -> Self {
        let slots = (0..slot_count).map(DisplaySlot::empty).collect();
        let (events, _) = broadcast::channel(SHOP_EVENT_CAPACITY);
        Self {
            state: Mutex::new(ShopState {
                slots,
                transactions: Vec::new(),
                treasury: Treasury::new(starting_gold),
                pricing: PricingEngine::new(pricing),
            }),
            events,
        }
    }

    /// Subscribes to shop notifications. Events are fire-and-forget; a slow
    /// subscriber that lags past the channel capacity misses old events.
    pub fn subscribe(&self) -> broadcast::Receiver<ShopEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ShopState> {
        // Lock poisoning means a panic mid-operation; propagating it here
        // would just cascade. Take the data as-is.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, event: ShopEvent) {
        let _ = self.events.send(event);
    }

    // ── Stocking ────────────────────────────────────────────────

    /// Places a ware in a display slot at the given price.
    ///
    /// Returns `false` without touching anything if the slot is occupied,
    /// the slot id is invalid, or the price is not positive.
    pub fn stock_item(&self, slot_id: usize, ware: &Ware, price: f64) -> bool {
        if price <= 0.0 {
            warn!(slot_id, price, "rejected stock request with non-positive price");
            return false;
        }

        {
            let mut state = self.lock();
            let Some(slot) = state.slots.get_mut(slot_id) else {
                warn!(slot_id, "rejected stock request for invalid slot");
                return false;
            };
            if slot.is_occupied() {
                return false;
            }
            slot.ware = Some(ware.clone());
            slot.price = price;
            slot.stocked_at = Some(Utc::now());
        }

        debug!(slot_id, ware = %ware.name, price, "stocked ware");
        self.publish(ShopEvent::ItemStocked {
            slot_id,
            ware_name: ware.name.clone(),
            price,
        });
        true
    }

    /// Takes the ware back off display. `None` if the slot is empty or
    /// invalid.
    pub fn remove_item(&self, slot_id: usize) -> Option<Ware> {
        let removed = {
            let mut state = self.lock();
            let slot = state.slots.get_mut(slot_id)?;
            slot.clear()
        }?;

        debug!(slot_id, ware = %removed.name, "removed ware from display");
        self.publish(ShopEvent::ItemRemoved {
            slot_id,
            ware_name: removed.name.clone(),
        });
        Some(removed)
    }

    /// Re-tags an occupied slot. `false` on empty/invalid slots or a
    /// non-positive price.
    pub fn update_price(&self, slot_id: usize, new_price: f64) -> bool {
        if new_price <= 0.0 {
            return false;
        }

        let old_price = {
            let mut state = self.lock();
            let Some(slot) = state.slots.get_mut(slot_id) else {
                return false;
            };
            if !slot.is_occupied() {
                return false;
            }
            let old = slot.price;
            slot.price = new_price;
            old
        };

        self.publish(ShopEvent::PriceUpdated {
            slot_id,
            old_price,
            new_price,
        });
        true
    }

    // ── Selling ─────────────────────────────────────────────────

    /// Completes a sale from one slot at the agreed price.
    ///
    /// Reads and clears the slot, estimates the cost, appends the
    /// transaction, and banks the gold as one atomic step. `None` means the
    /// slot was already empty or invalid: the caller lost a race and must
    /// treat the ware as unavailable.
    pub fn process_sale(
        &self,
        slot_id: usize,
        customer_id: Uuid,
        agreed_price: f64,
        satisfaction: Satisfaction,
    ) -> Option<SaleTransaction> {
        let transaction = {
            let mut state = self.lock();
            let slot = state.slots.get_mut(slot_id)?;
            let stocked_at = slot.stocked_at;
            let ware = slot.clear()?;

            let hours_on_display = stocked_at
                .map(|t| (Utc::now() - t).num_milliseconds() as f64 / 3_600_000.0)
                .unwrap_or(0.0)
                .max(0.0);

            let estimated_cost = ware.appraised_value() * COST_ESTIMATE_RATIO;
            let profit_margin = if agreed_price > 0.0 {
                (agreed_price - estimated_cost) / agreed_price
            } else {
                0.0
            };

            let transaction = SaleTransaction {
                ware_name: ware.name.clone(),
                ware_kind: ware.kind,
                quality: ware.quality,
                sale_price: agreed_price,
                estimated_cost,
                profit_margin,
                customer_id,
                timestamp: Utc::now(),
                satisfaction,
            };

            state.treasury.deposit(agreed_price);
            state
                .pricing
                .record_sale(&ware, agreed_price, hours_on_display, satisfaction);
            state.transactions.push(transaction.clone());
            transaction
        };

        debug!(
            slot_id,
            ware = %transaction.ware_name,
            price = transaction.sale_price,
            "sale completed"
        );
        self.publish(ShopEvent::SaleCompleted {
            transaction: transaction.clone(),
        });
        Some(transaction)
    }

    // ── Pricing delegation ──────────────────────────────────────

    /// Asks the pricing engine for an asking price for this ware.
    pub fn price_ware(&self, ware: &Ware, rng: &mut impl Rng) -> f64 {
        let mut state = self.lock();
        state.pricing.calculate_optimal_price(ware, ware.base_price, rng)
    }

    pub fn predict_satisfaction(
        &self,
        ware: &Ware,
        proposed_price: f64,
        price_sensitivity: f64,
    ) -> Satisfaction {
        let state = self.lock();
        state
            .pricing
            .predict_satisfaction(ware, proposed_price, ware.base_price, price_sensitivity)
    }

    pub fn set_strategy(&self, kind: WareKind, strategy: PricingStrategy) {
        self.lock().pricing.set_strategy(kind, strategy);
    }

    pub fn update_market(&self, hours_passed: f64) {
        self.lock().pricing.update_market_conditions(hours_passed);
    }

    pub fn advance_season(&self) {
        self.lock().pricing.advance_season();
    }

    pub fn market_snapshot(&self, kind: WareKind, quality: Quality) -> Option<MarketData> {
        self.lock().pricing.market_snapshot(kind, quality).cloned()
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn slot_count(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn items_on_display(&self) -> usize {
        self.lock().slots.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn available_slots(&self) -> usize {
        self.lock().slots.iter().filter(|s| !s.is_occupied()).count()
    }

    pub fn first_free_slot(&self) -> Option<usize> {
        self.lock()
            .slots
            .iter()
            .find(|s| !s.is_occupied())
            .map(|s| s.slot_id)
    }

    /// Snapshot of everything currently on display.
    pub fn displayed_wares(&self) -> Vec<(usize, Ware, f64)> {
        self.lock()
            .slots
            .iter()
            .filter_map(|s| s.ware.as_ref().map(|w| (s.slot_id, w.clone(), s.price)))
            .collect()
    }

    pub fn gold(&self) -> f64 {
        self.lock().treasury.gold()
    }

    pub fn transaction_count(&self) -> usize {
        self.lock().transactions.len()
    }

    pub fn transactions(&self) -> Vec<SaleTransaction> {
        self.lock().transactions.clone()
    }

    pub fn total_revenue(&self) -> f64 {
        self.lock().transactions.iter().map(|t| t.sale_price).sum()
    }

    pub fn total_profit(&self) -> f64 {
        self.lock().transactions.iter().map(|t| t.profit()).sum()
    }
}
