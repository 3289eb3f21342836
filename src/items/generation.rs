//! Procedural ware generation: themed names, quality rolls, expedition loot.

use rand::Rng;

use crate::core::constants::*;
use crate::items::types::{Quality, Ware, WareKind};

fn kind_base_price(kind: WareKind) -> f64 {
    match kind {
        WareKind::Weapon => WEAPON_BASE_PRICE,
        WareKind::Armor => ARMOR_BASE_PRICE,
        WareKind::Jewelry => JEWELRY_BASE_PRICE,
        WareKind::Potion => POTION_BASE_PRICE,
        WareKind::Relic => RELIC_BASE_PRICE,
    }
}

fn kind_nouns(kind: WareKind) -> &'static [&'static str] {
    match kind {
        WareKind::Weapon => &["Sword", "Axe", "Dagger", "Spear", "Mace", "Bow"],
        WareKind::Armor => &["Cuirass", "Helm", "Gauntlets", "Greaves", "Shield", "Cloak"],
        WareKind::Jewelry => &["Ring", "Amulet", "Circlet", "Brooch", "Bracelet", "Pendant"],
        WareKind::Potion => &["Tonic", "Elixir", "Draught", "Salve", "Philter", "Brew"],
        WareKind::Relic => &["Idol", "Tablet", "Orb", "Chalice", "Figurine", "Talisman"],
    }
}

fn quality_adjectives(quality: Quality) -> &'static [&'static str] {
    match quality {
        Quality::Common => &["Worn", "Plain", "Sturdy", "Simple", "Weathered"],
        Quality::Uncommon => &["Polished", "Fine", "Keen", "Hardy", "Burnished"],
        Quality::Rare => &["Gleaming", "Runed", "Tempered", "Silvered", "Warded"],
        Quality::Epic => &["Radiant", "Stormforged", "Sovereign", "Dusk-touched", "Hallowed"],
        Quality::Legendary => &["Mythic", "Sunblessed", "Dragonbone", "Kingmaker's", "Eclipse"],
    }
}

fn origin_tags() -> &'static [&'static str] {
    &[
        "of the Deep Halls",
        "of the Mire",
        "of Broken Crowns",
        "of the Old Road",
        "of Ember Vale",
        "of the Drowned Keep",
    ]
}

/// Rolls a quality tier. Higher expedition depth shifts weight upward.
pub fn roll_quality(depth: u32, rng: &mut impl Rng) -> Quality {
    // Base weights sum to 100; each depth level moves 4 points from Common
    // into the upper tiers, capped so Common never vanishes entirely.
    let shift = (depth.saturating_sub(1) as f64 * 4.0).min(35.0);
    let weights = [
        (55.0 - shift).max(10.0),
        25.0 + shift * 0.4,
        13.0 + shift * 0.3,
        5.0 + shift * 0.2,
        2.0 + shift * 0.1,
    ];
    let total: f64 = weights.iter().sum();
    let mut roll = rng.gen_range(0.0..total);
    for (i, w) in weights.iter().enumerate() {
        if roll < *w {
            return Quality::ALL[i];
        }
        roll -= w;
    }
    Quality::Legendary
}

/// Generates a ware of the given kind and quality with a themed name.
pub fn generate_ware(kind: WareKind, quality: Quality, rng: &mut impl Rng) -> Ware {
    let adjective = {
        let pool = quality_adjectives(quality);
        pool[rng.gen_range(0..pool.len())]
    };
    let noun = {
        let pool = kind_nouns(kind);
        pool[rng.gen_range(0..pool.len())]
    };

    // Rare and better wares carry an origin tag half the time.
    let name = if quality >= Quality::Rare && rng.gen_bool(0.5) {
        let tags = origin_tags();
        format!("{} {} {}", adjective, noun, tags[rng.gen_range(0..tags.len())])
    } else {
        format!("{} {}", adjective, noun)
    };

    let variance = rng.gen_range(WARE_PRICE_VARIANCE_MIN..WARE_PRICE_VARIANCE_MAX);
    let base_price = kind_base_price(kind) * variance;

    // Jewelry and relics lean pretty; appeal also rises with quality.
    let kind_appeal = match kind {
        WareKind::Jewelry | WareKind::Relic => 0.3,
        WareKind::Weapon | WareKind::Armor => 0.1,
        WareKind::Potion => 0.0,
    };
    let appeal = (kind_appeal + quality as usize as f64 * 0.12 + rng.gen_range(0.0..0.25))
        .clamp(0.0, 1.0);

    Ware::new(name, kind, quality, base_price, appeal)
}

/// Generates a random ware at the given expedition depth.
pub fn generate_random_ware(depth: u32, rng: &mut impl Rng) -> Ware {
    let kind = WareKind::ALL[rng.gen_range(0..WareKind::ALL.len())];
    let quality = roll_quality(depth, rng);
    generate_ware(kind, quality, rng)
}

/// Rolls loot for a defeated monster. Regular monsters drop occasionally;
/// bosses always pay out.
pub fn roll_monster_loot(depth: u32, was_boss: bool, rng: &mut impl Rng) -> Option<Ware> {
    if was_boss && BOSS_DROP_GUARANTEED {
        let mut ware = generate_random_ware(depth + 1, rng);
        // Boss hauls never come out Common.
        if ware.quality == Quality::Common {
            ware = generate_ware(ware.kind, Quality::Uncommon, rng);
        }
        return Some(ware);
    }

    if rng.gen_bool(MONSTER_DROP_CHANCE) {
        Some(generate_random_ware(depth, rng))
    } else {
        None
    }
}
