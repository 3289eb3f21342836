//! Customers: value types, procedural generation, and the AI decision
//! functions that drive browsing, haggling, and buying.

pub mod generation;
pub mod logic;
pub mod types;

pub use logic::Customer;
pub use types::{
    BudgetRange, CustomerKind, CustomerState, InterestLevel, Personality, PurchaseDecision,
    WarePreferences,
};
