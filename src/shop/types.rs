use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::items::types::{Quality, Ware, WareKind};
use crate::market::types::Satisfaction;

/// One fixed shop-front position holding at most one ware.
///
/// `price > 0` exactly when the slot is occupied; clearing the slot resets
/// the price to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySlot {
    pub slot_id: usize,
    pub ware: Option<Ware>,
    pub price: f64,
    pub stocked_at: Option<DateTime<Utc>>,
}

impl DisplaySlot {
    pub fn empty(slot_id: usize) -> Self {
        Self {
            slot_id,
            ware: None,
            price: 0.0,
            stocked_at: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.ware.is_some()
    }

    pub(crate) fn clear(&mut self) -> Option<Ware> {
        self.price = 0.0;
        self.stocked_at = None;
        self.ware.take()
    }
}

/// Immutable record of one completed sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleTransaction {
    pub ware_name: String,
    pub ware_kind: WareKind,
    pub quality: Quality,
    pub sale_price: f64,
    pub estimated_cost: f64,
    /// Profit as a fraction of the sale price.
    pub profit_margin: f64,
    pub customer_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub satisfaction: Satisfaction,
}

impl SaleTransaction {
    pub fn profit(&self) -> f64 {
        self.sale_price - self.estimated_cost
    }
}

/// Gold accounting for the shop. The wider expense ledger lives elsewhere;
/// this is only the balance the shop itself moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasury {
    gold: f64,
}

impl Treasury {
    pub fn new(starting_gold: f64) -> Self {
        Self {
            gold: starting_gold.max(0.0),
        }
    }

    pub fn gold(&self) -> f64 {
        self.gold
    }

    pub fn deposit(&mut self, amount: f64) {
        self.gold += amount.max(0.0);
    }

    /// Withdraws if the balance covers it; refuses overdrafts.
    pub fn try_spend(&mut self, amount: f64) -> bool {
        if amount < 0.0 || amount > self.gold {
            return false;
        }
        self.gold -= amount;
        true
    }
}

/// Fire-and-forget notification of a shop state change.
#[derive(Debug, Clone)]
pub enum ShopEvent {
    ItemStocked {
        slot_id: usize,
        ware_name: String,
        price: f64,
    },
    ItemRemoved {
        slot_id: usize,
        ware_name: String,
    },
    PriceUpdated {
        slot_id: usize,
        old_price: f64,
        new_price: f64,
    },
    SaleCompleted {
        transaction: SaleTransaction,
    },
}
