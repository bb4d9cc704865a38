//! Inventory counter and per-customer order ledger on top of [`Storage`](crate::storage::Storage).

pub mod codec;
mod inventory;
mod orders;

pub use inventory::*;
pub use orders::*;
