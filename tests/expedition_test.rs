//! Integration test: expedition combat flow
//!
//! Drives the combat state machine through full expeditions via the public
//! API: victory runs, retreats, the damage-ordering law, and the state
//! guards around expedition start.

use gildhall::combat::types::{generate_adventurer, generate_monster};
use gildhall::combat::{CombatEvent, CombatPhase, CombatSystem, Combatant, ExpeditionOutcome};
use gildhall::CombatError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TICK: f64 = 0.1;

fn adventurer(hp: f64, dps: f64, retreat: f64) -> Combatant {
    Combatant::new("Maren Quickblade".to_string(), hp, dps, retreat)
}

fn monster(name: &str, hp: f64, dps: f64) -> Combatant {
    Combatant::new(name.to_string(), hp, dps, 0.0)
}

/// Run updates until the system settles in Idle or Retreating, returning
/// every event along the way.
fn run_to_completion(system: &mut CombatSystem) -> Vec<CombatEvent> {
    let mut all_events = Vec::new();
    for _ in 0..100_000 {
        all_events.extend(system.update(TICK));
        match system.phase() {
            CombatPhase::Idle => break,
            CombatPhase::Retreating => {
                all_events.extend(system.resolve_retreat());
                break;
            }
            _ => {}
        }
    }
    all_events
}

// =============================================================================
// Full expedition runs
// =============================================================================

#[test]
fn test_strong_adventurer_clears_the_queue() {
    let mut system = CombatSystem::new();
    system
        .start_expedition(
            adventurer(200.0, 50.0, 0.2),
            vec![
                monster("Mire Crawler", 60.0, 4.0),
                monster("Fang Brute", 80.0, 6.0),
                monster("Gloom Warden", 100.0, 8.0),
            ],
        )
        .unwrap();

    let events = run_to_completion(&mut system);

    let defeated = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::MonsterDefeated { .. }))
        .count();
    assert_eq!(defeated, 3);

    let outcome = events.iter().find_map(|e| match e {
        CombatEvent::ExpeditionCompleted { outcome } => Some(*outcome),
        _ => None,
    });
    assert_eq!(outcome, Some(ExpeditionOutcome::Victory));

    // Regeneration completed and the system is ready for another run.
    assert_eq!(system.phase(), CombatPhase::Idle);
    let hero = system.adventurer().unwrap();
    assert_eq!(hero.current_health, hero.max_health);
    assert!(events
        .iter()
        .any(|e| matches!(e, CombatEvent::AdventurerRecovered)));
}

#[test]
fn test_outmatched_adventurer_retreats() {
    let mut system = CombatSystem::new();
    system
        .start_expedition(
            adventurer(100.0, 2.0, 0.25),
            vec![monster("Hollow Colossus", 5000.0, 30.0)],
        )
        .unwrap();

    let events = run_to_completion(&mut system);

    let outcome = events.iter().find_map(|e| match e {
        CombatEvent::ExpeditionCompleted { outcome } => Some(*outcome),
        _ => None,
    });
    assert_eq!(outcome, Some(ExpeditionOutcome::Retreat));
    assert_eq!(system.phase(), CombatPhase::Idle);

    // The adventurer walked out at or below the retreat fraction, alive.
    let hero = system.adventurer().unwrap();
    assert!(hero.health_fraction() <= 0.25);
    assert!(hero.current_health >= 0.0);
}

#[test]
fn test_expedition_completed_fires_exactly_once() {
    let mut system = CombatSystem::new();
    system
        .start_expedition(adventurer(150.0, 40.0, 0.2), vec![monster("Wisp", 30.0, 2.0)])
        .unwrap();

    let events = run_to_completion(&mut system);
    let completions = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::ExpeditionCompleted { .. }))
        .count();
    assert_eq!(completions, 1);
}

// =============================================================================
// State guards
// =============================================================================

#[test]
fn test_second_expedition_rejected_until_idle() {
    let mut system = CombatSystem::new();
    system
        .start_expedition(adventurer(200.0, 30.0, 0.2), vec![monster("Lurker", 90.0, 5.0)])
        .unwrap();

    // Fighting: rejected.
    assert!(matches!(
        system.start_expedition(adventurer(100.0, 10.0, 0.2), vec![]),
        Err(CombatError::ExpeditionInProgress {
            phase: CombatPhase::Fighting
        })
    ));

    // Regenerating: still rejected.
    while system.phase() == CombatPhase::Fighting {
        system.update(TICK);
    }
    assert_eq!(system.phase(), CombatPhase::Regenerating);
    assert!(system
        .start_expedition(adventurer(100.0, 10.0, 0.2), vec![])
        .is_err());

    // Idle again: accepted.
    run_to_completion(&mut system);
    assert_eq!(system.phase(), CombatPhase::Idle);
    assert!(system
        .start_expedition(adventurer(100.0, 10.0, 0.2), vec![monster("Next", 10.0, 1.0)])
        .is_ok());
}

// =============================================================================
// Ordering law
// =============================================================================

#[test]
fn test_overkill_damage_means_no_counterattack() {
    // Adventurer DPS 1000 vs 50 HP monster in one 1-second tick: the
    // monster dies before it can deal its 400 DPS back.
    let mut system = CombatSystem::new();
    system
        .start_expedition(
            adventurer(100.0, 1000.0, 0.2),
            vec![monster("Glass Horror", 50.0, 400.0)],
        )
        .unwrap();

    system.update(1.0);
    assert_eq!(system.adventurer().unwrap().current_health, 100.0);
}

#[test]
fn test_mutual_lethality_resolves_in_adventurers_favor() {
    // Both sides carry enough DPS to kill the other this tick; the
    // adventurer-first ordering decides it.
    let mut system = CombatSystem::new();
    system
        .start_expedition(
            adventurer(10.0, 500.0, 0.0),
            vec![monster("Deathtrap", 40.0, 500.0)],
        )
        .unwrap();

    let events = system.update(1.0);

    assert!(events
        .iter()
        .any(|e| matches!(e, CombatEvent::MonsterDefeated { .. })));
    let hero = system.adventurer().unwrap();
    assert_eq!(hero.current_health, 10.0);
    assert_eq!(system.phase(), CombatPhase::Regenerating);
}

// =============================================================================
// Generated expeditions
// =============================================================================

#[test]
fn test_generated_expeditions_always_resolve() {
    let mut rng = ChaCha8Rng::seed_from_u64(31);

    for depth in 1..=6 {
        let mut system = CombatSystem::new();
        let hero = generate_adventurer(depth, &mut rng);
        let pack: Vec<Combatant> = (0..4).map(|_| generate_monster(depth, &mut rng)).collect();

        system.start_expedition(hero, pack).unwrap();
        run_to_completion(&mut system);
        assert_eq!(system.phase(), CombatPhase::Idle);
    }
}
