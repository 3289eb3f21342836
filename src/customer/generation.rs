//! Procedural customer generation: themed names and kind-appropriate
//! temperaments, budgets, and tastes.

use std::collections::HashMap;

use rand::Rng;

use crate::customer::logic::Customer;
use crate::customer::types::{BudgetRange, CustomerKind, Personality, WarePreferences};
use crate::items::types::{Quality, WareKind};

fn first_names() -> &'static [&'static str] {
    &[
        "Tamsin", "Oswin", "Greta", "Fenwick", "Petra", "Aldous", "Mirabel", "Cassius", "Hild",
        "Leoric", "Sigrun", "Bartley",
    ]
}

fn surnames() -> &'static [&'static str] {
    &[
        "Thistlewood", "Marsh", "Copperfield", "Ravenhall", "Dunmore", "Ashcombe", "Veldt",
        "Harrow", "Quill", "Blackbriar",
    ]
}

pub fn generate_customer_name(kind: CustomerKind, rng: &mut impl Rng) -> String {
    let first = first_names()[rng.gen_range(0..first_names().len())];
    let last = surnames()[rng.gen_range(0..surnames().len())];
    match kind {
        CustomerKind::Noble => {
            if rng.gen_bool(0.5) {
                format!("Lord {} {}", first, last)
            } else {
                format!("Lady {} {}", first, last)
            }
        }
        CustomerKind::Merchant => format!("Trader {} {}", first, last),
        _ => format!("{} {}", first, last),
    }
}

/// Draws a visitor archetype. Novices are the bread and butter; nobles are
/// the rare whales.
pub fn roll_customer_kind(rng: &mut impl Rng) -> CustomerKind {
    let roll = rng.gen_range(0.0..1.0);
    if roll < 0.40 {
        CustomerKind::Novice
    } else if roll < 0.70 {
        CustomerKind::Veteran
    } else if roll < 0.85 {
        CustomerKind::Merchant
    } else {
        CustomerKind::Noble
    }
}

fn jitter(base: f64, spread: f64, rng: &mut impl Rng) -> f64 {
    (base + rng.gen_range(-spread..=spread)).clamp(0.0, 1.0)
}

fn generate_personality(kind: CustomerKind, rng: &mut impl Rng) -> Personality {
    match kind {
        CustomerKind::Novice => Personality {
            price_sensitivity: jitter(0.7, 0.15, rng),
            impulse_buying: jitter(0.6, 0.2, rng),
            negotiation_tendency: jitter(0.2, 0.15, rng),
            aesthetic_appreciation: jitter(0.4, 0.2, rng),
            patience: jitter(0.4, 0.2, rng),
        },
        CustomerKind::Veteran => Personality {
            price_sensitivity: jitter(0.6, 0.15, rng),
            impulse_buying: jitter(0.35, 0.15, rng),
            negotiation_tendency: jitter(0.55, 0.2, rng),
            aesthetic_appreciation: jitter(0.3, 0.15, rng),
            patience: jitter(0.6, 0.2, rng),
        },
        CustomerKind::Noble => Personality {
            price_sensitivity: jitter(0.2, 0.15, rng),
            impulse_buying: jitter(0.55, 0.2, rng),
            negotiation_tendency: jitter(0.25, 0.15, rng),
            aesthetic_appreciation: jitter(0.8, 0.15, rng),
            patience: jitter(0.5, 0.2, rng),
        },
        CustomerKind::Merchant => Personality {
            price_sensitivity: jitter(0.85, 0.1, rng),
            impulse_buying: jitter(0.15, 0.1, rng),
            negotiation_tendency: jitter(0.8, 0.15, rng),
            aesthetic_appreciation: jitter(0.35, 0.15, rng),
            patience: jitter(0.75, 0.15, rng),
        },
    }
}

fn generate_budget(kind: CustomerKind, rng: &mut impl Rng) -> BudgetRange {
    let (min, max, typical) = match kind {
        CustomerKind::Novice => (10.0, 90.0, 40.0),
        CustomerKind::Veteran => (40.0, 250.0, 110.0),
        CustomerKind::Noble => (120.0, 900.0, 350.0),
        CustomerKind::Merchant => (60.0, 450.0, 180.0),
    };
    let scale = rng.gen_range(0.8..1.2);
    BudgetRange {
        min: min * scale,
        max: max * scale,
        typical: typical * scale,
    }
}

fn favored_kinds(kind: CustomerKind) -> &'static [WareKind] {
    match kind {
        CustomerKind::Novice => &[WareKind::Potion, WareKind::Weapon],
        CustomerKind::Veteran => &[WareKind::Weapon, WareKind::Armor],
        CustomerKind::Noble => &[WareKind::Jewelry, WareKind::Relic],
        CustomerKind::Merchant => &[WareKind::Relic, WareKind::Jewelry, WareKind::Weapon],
    }
}

fn generate_preferences(kind: CustomerKind, rng: &mut impl Rng) -> WarePreferences {
    let mut kind_weights = HashMap::new();
    for ware_kind in WareKind::ALL {
        let base = if favored_kinds(kind).contains(&ware_kind) {
            0.75
        } else {
            0.35
        };
        kind_weights.insert(ware_kind, jitter(base, 0.2, rng));
    }

    let quality_affinity = match kind {
        CustomerKind::Novice => {
            if rng.gen_bool(0.7) {
                Quality::Common
            } else {
                Quality::Uncommon
            }
        }
        CustomerKind::Veteran => {
            if rng.gen_bool(0.5) {
                Quality::Uncommon
            } else {
                Quality::Rare
            }
        }
        CustomerKind::Noble => {
            if rng.gen_bool(0.6) {
                Quality::Epic
            } else {
                Quality::Legendary
            }
        }
        CustomerKind::Merchant => Quality::Rare,
    };

    WarePreferences {
        kind_weights,
        quality_affinity,
    }
}

/// Generates a fully-formed customer of the given archetype.
pub fn generate_customer(kind: CustomerKind, rng: &mut impl Rng) -> Customer {
    Customer::new(
        generate_customer_name(kind, rng),
        kind,
        generate_personality(kind, rng),
        generate_budget(kind, rng),
        generate_preferences(kind, rng),
    )
}

/// Generates a customer of random archetype.
pub fn generate_random_customer(rng: &mut impl Rng) -> Customer {
    let kind = roll_customer_kind(rng);
    generate_customer(kind, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(13)
    }

    #[test]
    fn test_generated_customer_is_coherent() {
        let mut rng = test_rng();
        for kind in CustomerKind::ALL {
            let customer = generate_customer(kind, &mut rng);
            assert_eq!(customer.kind(), kind);
            assert!(!customer.name().is_empty());

            let budget = customer.budget();
            assert!(budget.min < budget.typical);
            assert!(budget.typical < budget.max);

            let p = customer.personality();
            for value in [
                p.price_sensitivity,
                p.impulse_buying,
                p.negotiation_tendency,
                p.aesthetic_appreciation,
                p.patience,
            ] {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_noble_names_carry_title() {
        let mut rng = test_rng();
        let name = generate_customer_name(CustomerKind::Noble, &mut rng);
        assert!(name.starts_with("Lord ") || name.starts_with("Lady "));
    }

    #[test]
    fn test_kind_roll_covers_all_archetypes() {
        let mut rng = test_rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(roll_customer_kind(&mut rng));
        }
        assert_eq!(seen.len(), CustomerKind::ALL.len());
    }

    #[test]
    fn test_nobles_favor_finery() {
        let mut rng = test_rng();
        let noble = generate_customer(CustomerKind::Noble, &mut rng);
        let prefs = noble.preferences();
        assert!(prefs.quality_affinity >= Quality::Epic);
        // Favored base 0.75 vs 0.35, jitter up to 0.2 either way.
        assert!(prefs.kind_weights[&WareKind::Jewelry] >= 0.55);
        assert!(prefs.kind_weights[&WareKind::Potion] <= 0.55);
    }
}
