use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use super::{Storage, StoreError};

/// In-memory implementation for development and testing.
///
/// Clones share the same slot, so a test can keep one handle to inspect what
/// the code under test persisted.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)]
pub struct InMemoryStorage {
    contents: Arc<Mutex<Option<String>>>,
}

#[allow(dead_code)]
impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// Current contents, `None` if never written or removed.
    pub fn snapshot(&self) -> Option<String> {
        self.contents.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn read_all(&self) -> Result<Option<String>, StoreError> {
        let contents = self
            .contents
            .lock()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        Ok(contents.clone())
    }

    async fn write_all(&self, contents: &str) -> Result<(), StoreError> {
        let mut slot = self
            .contents
            .lock()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        *slot = Some(contents.to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<(), StoreError> {
        let mut slot = self
            .contents
            .lock()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
