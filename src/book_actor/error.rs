use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::storage::StoreError;

/// Errors that can occur during bookkeeping operations.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: i64 },
    #[error("Book storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Unexpected action result: {0}")]
    UnexpectedResult(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(#[from] FrameworkError),
}
