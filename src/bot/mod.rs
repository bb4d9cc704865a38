//! Command routing between a chat transport and the cookie book.

pub mod handlers;
pub mod messenger;
pub mod texts;
pub mod update;

pub use handlers::*;
pub use messenger::*;
pub use update::*;
