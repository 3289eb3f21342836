//! Expedition state machine.
//!
//! Drives one adventurer through a queue of monsters with fixed-timestep
//! damage accumulation. Phases: Idle → Traveling → Fighting →
//! {Retreating | Regenerating} → Idle. Regenerating returns to Idle on its
//! own once the adventurer is back at full health; Retreating waits for the
//! caller to resolve it (`resolve_retreat`).
//!
//! Ordering invariant: within one update the adventurer's damage lands on
//! the monster first, and a monster that dies deals no damage back that
//! tick. This decides the edge case where both would die in the same tick.

use std::collections::VecDeque;

use crate::combat::types::{CombatEvent, CombatPhase, Combatant, ExpeditionOutcome};
use crate::core::constants::REGEN_FRACTION_PER_SECOND;
use crate::core::error::CombatError;

pub struct CombatSystem {
    phase: CombatPhase,
    adventurer: Option<Combatant>,
    current_monster: Option<Combatant>,
    monster_queue: VecDeque<Combatant>,
}

impl Default for CombatSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatSystem {
    pub fn new() -> Self {
        Self {
            phase: CombatPhase::Idle,
            adventurer: None,
            current_monster: None,
            monster_queue: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn adventurer(&self) -> Option<&Combatant> {
        self.adventurer.as_ref()
    }

    pub fn current_monster(&self) -> Option<&Combatant> {
        self.current_monster.as_ref()
    }

    /// Monsters still waiting in the queue (excludes the one being fought).
    pub fn monsters_remaining(&self) -> usize {
        self.monster_queue.len()
    }

    /// Begins a new expedition. Fails unless the system is Idle.
    ///
    /// The system passes through Traveling and engages the first monster
    /// before returning, so on success the phase is Fighting (or
    /// Regenerating, for an expedition with no monsters at all).
    pub fn start_expedition(
        &mut self,
        adventurer: Combatant,
        monsters: Vec<Combatant>,
    ) -> Result<Vec<CombatEvent>, CombatError> {
        if self.phase != CombatPhase::Idle {
            return Err(CombatError::ExpeditionInProgress { phase: self.phase });
        }

        let mut events = Vec::new();
        self.adventurer = Some(adventurer);
        self.monster_queue = monsters.into();
        self.set_phase(CombatPhase::Traveling, &mut events);

        match self.monster_queue.pop_front() {
            Some(monster) => {
                events.push(CombatEvent::MonsterEngaged {
                    name: monster.name.clone(),
                });
                self.current_monster = Some(monster);
                self.set_phase(CombatPhase::Fighting, &mut events);
            }
            None => {
                // Nothing to fight: the expedition is trivially won.
                self.set_phase(CombatPhase::Regenerating, &mut events);
                events.push(CombatEvent::ExpeditionCompleted {
                    outcome: ExpeditionOutcome::Victory,
                });
            }
        }

        Ok(events)
    }

    /// Advances combat by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f64) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if delta_time <= 0.0 {
            return events;
        }

        match self.phase {
            CombatPhase::Fighting => self.update_fighting(delta_time, &mut events),
            CombatPhase::Regenerating => self.update_regenerating(delta_time, &mut events),
            CombatPhase::Idle | CombatPhase::Traveling | CombatPhase::Retreating => {}
        }

        events
    }

    fn update_fighting(&mut self, delta_time: f64, events: &mut Vec<CombatEvent>) {
        let (Some(adventurer), Some(monster)) =
            (self.adventurer.as_mut(), self.current_monster.as_mut())
        else {
            return;
        };

        // Adventurer strikes first.
        monster.take_damage(adventurer.damage_per_second * delta_time);

        if !monster.is_alive() {
            // A dead monster deals no damage this tick.
            let name = monster.name.clone();
            self.current_monster = None;
            events.push(CombatEvent::MonsterDefeated { name });

            match self.monster_queue.pop_front() {
                Some(next) => {
                    events.push(CombatEvent::MonsterEngaged {
                        name: next.name.clone(),
                    });
                    self.current_monster = Some(next);
                }
                None => {
                    self.set_phase(CombatPhase::Regenerating, events);
                    events.push(CombatEvent::ExpeditionCompleted {
                        outcome: ExpeditionOutcome::Victory,
                    });
                }
            }
            return;
        }

        adventurer.take_damage(monster.damage_per_second * delta_time);

        if adventurer.should_retreat() {
            self.monster_queue.clear();
            self.current_monster = None;
            self.set_phase(CombatPhase::Retreating, events);
            events.push(CombatEvent::ExpeditionCompleted {
                outcome: ExpeditionOutcome::Retreat,
            });
        }
    }

    fn update_regenerating(&mut self, delta_time: f64, events: &mut Vec<CombatEvent>) {
        let Some(adventurer) = self.adventurer.as_mut() else {
            return;
        };

        let heal = adventurer.max_health * REGEN_FRACTION_PER_SECOND * delta_time;
        adventurer.heal(heal);

        if adventurer.current_health >= adventurer.max_health {
            events.push(CombatEvent::AdventurerRecovered);
            self.set_phase(CombatPhase::Idle, events);
        }
    }

    /// Pulls the adventurer out of the expedition immediately.
    ///
    /// Only effective while Traveling or Fighting; otherwise a no-op.
    pub fn force_retreat(&mut self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if !matches!(self.phase, CombatPhase::Traveling | CombatPhase::Fighting) {
            return events;
        }

        self.monster_queue.clear();
        self.current_monster = None;
        self.set_phase(CombatPhase::Retreating, &mut events);
        events.push(CombatEvent::ExpeditionCompleted {
            outcome: ExpeditionOutcome::Retreat,
        });
        events
    }

    /// Returns a Retreating system to Idle once the caller has dealt with
    /// the aftermath. No-op in any other phase.
    pub fn resolve_retreat(&mut self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.phase == CombatPhase::Retreating {
            self.set_phase(CombatPhase::Idle, &mut events);
        }
        events
    }

    fn set_phase(&mut self, to: CombatPhase, events: &mut Vec<CombatEvent>) {
        let from = self.phase;
        self.phase = to;
        events.push(CombatEvent::PhaseChanged { from, to });
    }
}
