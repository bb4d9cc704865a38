//! Transports that feed updates into the bot.

pub mod console;

pub use console::*;
