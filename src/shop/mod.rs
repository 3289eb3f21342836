//! The shop floor: display slots, treasury, transaction history, and the
//! manager that keeps every operation atomic under concurrent customers.

pub mod manager;
pub mod types;

pub use manager::ShopManager;
pub use types::{DisplaySlot, SaleTransaction, ShopEvent, Treasury};
