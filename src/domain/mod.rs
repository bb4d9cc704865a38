pub mod user;
pub mod order;

pub use user::*;
pub use order::*;
