use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::*;

/// Mutable health/damage record for one adventurer or monster.
///
/// Health is tracked as `f64` because damage accrues continuously
/// (damage-per-second times delta time). `take_damage` and `heal` keep
/// `0 <= current_health <= max_health` at all times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub max_health: f64,
    pub current_health: f64,
    pub damage_per_second: f64,
    /// Fraction of max health at or below which the combatant gives up.
    pub retreat_threshold: f64,
}

impl Combatant {
    pub fn new(name: String, max_health: f64, damage_per_second: f64, retreat_threshold: f64) -> Self {
        Self {
            name,
            current_health: max_health,
            max_health,
            damage_per_second,
            retreat_threshold,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }

    pub fn take_damage(&mut self, amount: f64) {
        self.current_health = (self.current_health - amount.max(0.0)).max(0.0);
    }

    pub fn heal(&mut self, amount: f64) {
        self.current_health = (self.current_health + amount.max(0.0)).min(self.max_health);
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.current_health / self.max_health
        }
    }

    /// True once health has fallen to the retreat threshold (or to zero).
    pub fn should_retreat(&self) -> bool {
        !self.is_alive() || self.health_fraction() <= self.retreat_threshold
    }
}

/// Discrete state of the expedition state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    Idle,
    Traveling,
    Fighting,
    Retreating,
    Regenerating,
}

/// How an expedition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpeditionOutcome {
    /// Every queued monster was defeated.
    Victory,
    /// The adventurer fell to the retreat threshold or was forced back.
    Retreat,
}

/// A single event produced by a combat update.
///
/// The presentation layer maps these to log lines and UI changes; combat
/// logic never touches UI types directly.
#[derive(Debug, Clone)]
pub enum CombatEvent {
    PhaseChanged { from: CombatPhase, to: CombatPhase },
    MonsterEngaged { name: String },
    MonsterDefeated { name: String },
    ExpeditionCompleted { outcome: ExpeditionOutcome },
    /// Regeneration finished; the adventurer is back at full health.
    AdventurerRecovered,
}

pub fn generate_monster_name(rng: &mut impl Rng) -> String {
    let prefixes = [
        "Gloom", "Rot", "Ash", "Mire", "Fang", "Hollow", "Grave", "Rust", "Murk", "Thorn",
    ];
    let suffixes = [
        "Stalker", "Wretch", "Maw", "Shade", "Crawler", "Brute", "Howler", "Warden", "Fiend",
        "Lurker",
    ];

    let prefix = prefixes[rng.gen_range(0..prefixes.len())];
    let suffix = suffixes[rng.gen_range(0..suffixes.len())];
    format!("{} {}", prefix, suffix)
}

pub fn generate_adventurer_name(rng: &mut impl Rng) -> String {
    let first = [
        "Bram", "Isolde", "Corvin", "Maren", "Aldric", "Sable", "Edda", "Roderic", "Lys", "Garrick",
    ];
    let epithet = [
        "the Bold", "Ironhand", "of the Vale", "Quickblade", "the Wary", "Stormborn", "the Gray",
        "Oakenshield", "the Younger", "Longstride",
    ];

    let name = first[rng.gen_range(0..first.len())];
    let tag = epithet[rng.gen_range(0..epithet.len())];
    format!("{} {}", name, tag)
}

/// Looks up monster base stats for an expedition depth (1-based).
/// Depths beyond the table extend the deepest row by its per-depth steps.
fn depth_base_stats(depth: u32) -> (f64, f64) {
    let index = (depth.saturating_sub(1) as usize).min(DEPTH_MONSTER_STATS.len() - 1);
    let (base_hp, hp_step, base_dps, dps_step) = DEPTH_MONSTER_STATS[index];
    let overflow = depth.saturating_sub(DEPTH_MONSTER_STATS.len() as u32) as f64;
    (base_hp + overflow * hp_step, base_dps + overflow * dps_step)
}

/// Generates a monster scaled for the given expedition depth, with variance.
pub fn generate_monster(depth: u32, rng: &mut impl Rng) -> Combatant {
    let (base_hp, base_dps) = depth_base_stats(depth);

    let hp_var = rng.gen_range(COMBATANT_STAT_VARIANCE_MIN..COMBATANT_STAT_VARIANCE_MAX);
    let dps_var = rng.gen_range(COMBATANT_STAT_VARIANCE_MIN..COMBATANT_STAT_VARIANCE_MAX);

    let hp = (base_hp * hp_var).max(1.0);
    let dps = (base_dps * dps_var).max(0.5);

    // Monsters fight to the death; only adventurers retreat.
    Combatant::new(generate_monster_name(rng), hp, dps, 0.0)
}

/// Generates a boss-grade monster for the end of an expedition.
pub fn generate_boss_monster(depth: u32, rng: &mut impl Rng) -> Combatant {
    let mut boss = generate_monster(depth, rng);
    let (hp_mult, dps_mult) = BOSS_MONSTER_MULTIPLIERS;
    boss.name = format!("Dread {}", boss.name);
    boss.max_health = (boss.max_health * hp_mult).max(1.0);
    boss.current_health = boss.max_health;
    boss.damage_per_second *= dps_mult;
    boss
}

/// Generates an adventurer scaled by experience rank (0 = fresh recruit).
pub fn generate_adventurer(rank: u32, rng: &mut impl Rng) -> Combatant {
    let hp_var = rng.gen_range(COMBATANT_STAT_VARIANCE_MIN..COMBATANT_STAT_VARIANCE_MAX);
    let dps_var = rng.gen_range(COMBATANT_STAT_VARIANCE_MIN..COMBATANT_STAT_VARIANCE_MAX);

    let hp = (ADVENTURER_BASE_HP + rank as f64 * ADVENTURER_HP_PER_RANK) * hp_var;
    let dps = (ADVENTURER_BASE_DPS + rank as f64 * ADVENTURER_DPS_PER_RANK) * dps_var;

    Combatant::new(
        generate_adventurer_name(rng),
        hp,
        dps,
        DEFAULT_RETREAT_THRESHOLD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_combatant_creation() {
        let c = Combatant::new("Bram".to_string(), 100.0, 10.0, 0.2);
        assert_eq!(c.current_health, 100.0);
        assert_eq!(c.max_health, 100.0);
        assert!(c.is_alive());
        assert!(!c.should_retreat());
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut c = Combatant::new("Bram".to_string(), 50.0, 10.0, 0.2);
        c.take_damage(80.0);
        assert_eq!(c.current_health, 0.0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut c = Combatant::new("Bram".to_string(), 50.0, 10.0, 0.2);
        c.take_damage(-20.0);
        assert_eq!(c.current_health, 50.0);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut c = Combatant::new("Bram".to_string(), 50.0, 10.0, 0.2);
        c.take_damage(30.0);
        c.heal(100.0);
        assert_eq!(c.current_health, 50.0);
    }

    #[test]
    fn test_should_retreat_at_threshold() {
        let mut c = Combatant::new("Bram".to_string(), 100.0, 10.0, 0.2);
        c.take_damage(79.0);
        assert!(!c.should_retreat());
        c.take_damage(1.0);
        assert!(c.should_retreat()); // exactly at the 0.2 fraction
    }

    #[test]
    fn test_generate_monster_scales_with_depth() {
        let mut rng = test_rng();
        let shallow = generate_monster(1, &mut rng);
        let deep = generate_monster(5, &mut rng);
        assert!(deep.max_health > shallow.max_health);
        assert!(deep.damage_per_second > shallow.damage_per_second);
        assert_eq!(shallow.retreat_threshold, 0.0);
    }

    #[test]
    fn test_generate_boss_monster_outclasses_regular() {
        let mut rng = test_rng();
        let boss = generate_boss_monster(2, &mut rng);
        assert!(boss.name.starts_with("Dread "));
        // Base depth-2 HP is 70 pre-variance; boss multiplier is 2.5x.
        assert!(boss.max_health > 150.0);
        assert_eq!(boss.current_health, boss.max_health);
    }

    #[test]
    fn test_generate_adventurer_rank_scaling() {
        let mut rng = test_rng();
        let recruit = generate_adventurer(0, &mut rng);
        let veteran = generate_adventurer(5, &mut rng);
        assert!(veteran.max_health > recruit.max_health);
        assert!(veteran.damage_per_second > recruit.damage_per_second);
        assert_eq!(recruit.retreat_threshold, DEFAULT_RETREAT_THRESHOLD);
    }

    #[test]
    fn test_deep_expedition_reuses_last_stat_row() {
        let mut rng = test_rng();
        let m = generate_monster(99, &mut rng);
        // Depth 99 on a 6-row table: base 400 + 98*45 steps, minus variance.
        assert!(m.max_health > 3000.0);
    }
}
