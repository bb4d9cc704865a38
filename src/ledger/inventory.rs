use tracing::{info, instrument};

use crate::storage::{Storage, StoreError};

/// The remaining-units counter of the current batch.
pub struct InventoryStore {
    storage: Box<dyn Storage>,
    initial_total: i64,
}

impl InventoryStore {
    pub fn new(storage: impl Storage + 'static, initial_total: i64) -> Self {
        Self {
            storage: Box::new(storage),
            initial_total,
        }
    }

    /// Current remaining count. When nothing is persisted yet the configured
    /// total is written and returned.
    #[instrument(skip(self))]
    pub async fn get_remaining(&self) -> Result<i64, StoreError> {
        let raw = self.storage.read_all().await?;
        match raw.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.parse::<i64>().map_err(|e| StoreError::Corrupt {
                what: "inventory count",
                detail: format!("{:?}: {}", value, e),
            }),
            _ => {
                info!(total = self.initial_total, "Initializing inventory");
                self.set_remaining(self.initial_total).await?;
                Ok(self.initial_total)
            }
        }
    }

    /// Overwrites the counter. No bounds check.
    #[instrument(skip(self))]
    pub async fn set_remaining(&self, remaining: i64) -> Result<(), StoreError> {
        self.storage.write_all(&remaining.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    #[tokio::test]
    async fn test_absent_count_is_initialized_and_persisted() {
        let storage = InMemoryStorage::new();
        let inventory = InventoryStore::new(storage.clone(), 60);

        assert_eq!(inventory.get_remaining().await.unwrap(), 60);
        assert_eq!(storage.snapshot().as_deref(), Some("60"));
    }

    #[tokio::test]
    async fn test_set_accepts_any_integer() {
        let inventory = InventoryStore::new(InMemoryStorage::new(), 60);

        inventory.set_remaining(-3).await.unwrap();
        assert_eq!(inventory.get_remaining().await.unwrap(), -3);
    }

    #[tokio::test]
    async fn test_trailing_newline_is_tolerated() {
        let inventory = InventoryStore::new(InMemoryStorage::with_contents("42\n"), 60);
        assert_eq!(inventory.get_remaining().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_garbage_count_is_corrupt() {
        let inventory = InventoryStore::new(InMemoryStorage::with_contents("many"), 60);

        let err = inventory.get_remaining().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { what: "inventory count", .. }));
    }
}
