//! System configuration, startup, and shutdown logic.

pub mod config;
pub mod cookie_system;
pub mod telemetry;

pub use config::*;
pub use cookie_system::*;
pub use telemetry::*;
