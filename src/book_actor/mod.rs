//! Batch bookkeeping: the inventory counter and the order ledger, mutated together.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;
