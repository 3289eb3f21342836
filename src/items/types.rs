use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::constants::QUALITY_PRICE_MULTIPLIERS;

/// Quality tier of a ware, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quality {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::Common,
        Quality::Uncommon,
        Quality::Rare,
        Quality::Epic,
        Quality::Legendary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Quality::Common => "Common",
            Quality::Uncommon => "Uncommon",
            Quality::Rare => "Rare",
            Quality::Epic => "Epic",
            Quality::Legendary => "Legendary",
        }
    }

    /// Price multiplier for this tier. Strictly increasing with quality.
    pub fn price_multiplier(&self) -> f64 {
        QUALITY_PRICE_MULTIPLIERS[*self as usize]
    }
}

/// Category of a ware. Customers weight their interest by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WareKind {
    Weapon,
    Armor,
    Jewelry,
    Potion,
    Relic,
}

impl WareKind {
    pub const ALL: [WareKind; 5] = [
        WareKind::Weapon,
        WareKind::Armor,
        WareKind::Jewelry,
        WareKind::Potion,
        WareKind::Relic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WareKind::Weapon => "Weapon",
            WareKind::Armor => "Armor",
            WareKind::Jewelry => "Jewelry",
            WareKind::Potion => "Potion",
            WareKind::Relic => "Relic",
        }
    }
}

/// A single priceable good.
///
/// `base_price` is the kind-level catalog base, before any quality markup;
/// the pricing engine applies the quality multiplier when computing an
/// asking price, and [`Ware::appraised_value`] is the matching
/// quality-adjusted worth used wherever a ware's expected value is needed.
/// `appeal` in `[0, 1]` feeds the aesthetic bonus in customer satisfaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ware {
    pub id: Uuid,
    pub name: String,
    pub kind: WareKind,
    pub quality: Quality,
    pub base_price: f64,
    pub appeal: f64,
}

impl Ware {
    pub fn new(name: String, kind: WareKind, quality: Quality, base_price: f64, appeal: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            quality,
            base_price,
            appeal: appeal.clamp(0.0, 1.0),
        }
    }

    /// Quality-adjusted worth: what a buyer would reasonably expect to pay.
    pub fn appraised_value(&self) -> f64 {
        self.base_price * self.quality.price_multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_ordering() {
        assert!(Quality::Common < Quality::Uncommon);
        assert!(Quality::Uncommon < Quality::Rare);
        assert!(Quality::Rare < Quality::Epic);
        assert!(Quality::Epic < Quality::Legendary);
    }

    #[test]
    fn test_quality_multiplier_strictly_increasing() {
        for pair in Quality::ALL.windows(2) {
            assert!(pair[0].price_multiplier() < pair[1].price_multiplier());
        }
    }

    #[test]
    fn test_ware_appeal_is_clamped() {
        let ware = Ware::new("Gaudy Ring".to_string(), WareKind::Jewelry, Quality::Rare, 60.0, 1.7);
        assert_eq!(ware.appeal, 1.0);
        let dull = Ware::new("Dull Ring".to_string(), WareKind::Jewelry, Quality::Common, 20.0, -0.3);
        assert_eq!(dull.appeal, 0.0);
    }

    #[test]
    fn test_ware_ids_are_unique() {
        let a = Ware::new("Knife".to_string(), WareKind::Weapon, Quality::Common, 10.0, 0.2);
        let b = Ware::new("Knife".to_string(), WareKind::Weapon, Quality::Common, 10.0, 0.2);
        assert_ne!(a.id, b.id);
    }
}
