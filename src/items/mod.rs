//! Wares: the goods adventurers haul back and the shop puts on display.

pub mod generation;
pub mod types;

pub use types::{Quality, Ware, WareKind};
