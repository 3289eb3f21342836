//! Error types for caller-error preconditions.
//!
//! Invalid operation *requests* (stocking an occupied slot, selling from an
//! empty one) are reported through `bool`/`Option` returns on [`crate::shop`]
//! operations so callers can branch cheaply. The errors here are reserved for
//! genuine caller bugs that must not be swallowed.

use crate::combat::types::CombatPhase;
use thiserror::Error;

/// Precondition violations on the expedition state machine.
#[derive(Debug, Error, PartialEq)]
pub enum CombatError {
    /// An expedition was started while another is still running.
    #[error("expedition already in progress (phase {phase:?})")]
    ExpeditionInProgress { phase: CombatPhase },
}

/// Precondition violations on customer purchase flow.
#[derive(Debug, Error, PartialEq)]
pub enum CustomerError {
    /// `complete_purchase` was called for a ware the customer is not
    /// currently considering.
    #[error("purchase finalized for {finalized}, but customer is considering {considering:?}")]
    WrongWareFinalized {
        finalized: String,
        considering: Option<String>,
    },
}
