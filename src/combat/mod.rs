//! Expedition combat: combatant stats and the tick-driven state machine.

pub mod system;
pub mod types;

pub use system::CombatSystem;
pub use types::{CombatEvent, CombatPhase, Combatant, ExpeditionOutcome};
