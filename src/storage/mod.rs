//! Whole-blob persistence behind the inventory counter and the order ledger.
//!
//! Every store is read entirely and written entirely on each operation, so the
//! seam is just read-all / write-all (plus remove).

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::InMemoryStorage;

use std::path::PathBuf;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt {what}: {detail}")]
    Corrupt { what: &'static str, detail: String },
    #[error("Storage internal error: {0}")]
    Internal(String),
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns `None` when nothing has been persisted yet.
    async fn read_all(&self) -> Result<Option<String>, StoreError>;

    async fn write_all(&self, contents: &str) -> Result<(), StoreError>;

    async fn remove(&self) -> Result<(), StoreError> {
        self.write_all("").await
    }
}
