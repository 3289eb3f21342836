//! Gildhall - Idle Dungeon-and-Shop Simulation Library
//!
//! Adventurers run expeditions through queued monsters; the loot lands on the
//! shop floor where AI customers browse, haggle, and buy. This crate exposes
//! the simulation core for the headless simulator binary and for tests.

pub mod combat;
pub mod core;
pub mod customer;
pub mod items;
pub mod market;
pub mod session;
pub mod shop;
pub mod simulator;
pub mod traffic;

pub use crate::core::constants::TICK_INTERVAL_MS;
pub use crate::core::error::{CombatError, CustomerError};
