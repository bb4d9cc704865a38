use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::app_system::BotConfig;
use crate::book_actor::CookieBook;
use crate::clients::BookClient;
use crate::ledger::{InventoryStore, OrderLedger};
use crate::storage::{FileStorage, Storage};

const BOOK_BUFFER: usize = 32;

/// Owns the running book actor.
///
/// Responsible for wiring storage into the book, starting the actor, and
/// shutting it down.
pub struct CookieSystem {
    pub book_client: BookClient,
    handle: tokio::task::JoinHandle<()>,
}

impl CookieSystem {
    /// Starts the book over the two files under `config.data_dir`.
    pub async fn start(config: &BotConfig) -> Result<Self, String> {
        tokio::fs::create_dir_all(&config.data_dir)
            .await
            .map_err(|e| format!("Cannot create data dir {}: {}", config.data_dir.display(), e))?;

        info!(
            inventory = %config.inventory_path().display(),
            orders = %config.orders_path().display(),
            "Using file storage"
        );
        Ok(Self::with_storage(
            FileStorage::new(config.inventory_path()),
            FileStorage::new(config.orders_path()),
            config.total_cookies,
        ))
    }

    pub fn with_storage(
        inventory: impl Storage + 'static,
        orders: impl Storage + 'static,
        total_cookies: i64,
    ) -> Self {
        let book = CookieBook::new(
            InventoryStore::new(inventory, total_cookies),
            OrderLedger::new(orders),
        );
        let (actor, client) = ResourceActor::new(BOOK_BUFFER, book);
        let handle = tokio::spawn(actor.run());

        Self {
            book_client: BookClient::new(client),
            handle,
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        self.book_client.shutdown().await.map_err(|e| e.to_string())?;

        if let Err(e) = self.handle.await {
            error!("Book actor task failed: {:?}", e);
            return Err(format!("Book actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
