use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::actor_framework::Entity;
use crate::domain::{ExportLine, UserIdentity};
use crate::ledger::{InventoryStore, OrderLedger};
use crate::storage::StoreError;
use super::actions::{BookAction, BookActionResult, Placement};
use super::error::BookError;

/// Owns both stores of the active batch.
///
/// Meant to live inside a single `ResourceActor`, which is what keeps the
/// read-compute-write sequences below from interleaving.
pub struct CookieBook {
    inventory: InventoryStore,
    ledger: OrderLedger,
}

impl CookieBook {
    pub fn new(inventory: InventoryStore, ledger: OrderLedger) -> Self {
        Self { inventory, ledger }
    }

    /// Sets the customer's total to `requested`, charging or refunding only the
    /// difference against the remaining count.
    #[instrument(skip(self), fields(user_id = customer.id))]
    async fn place_order(&mut self, customer: UserIdentity, requested: u32) -> Result<Placement, BookError> {
        let previous = self.ledger.get_quantity(customer.id).await?;
        let delta = i64::from(requested) - i64::from(previous);
        let remaining = self.inventory.get_remaining().await?;

        if delta > remaining {
            info!(delta, remaining, "Order exceeds remaining stock");
            return Err(BookError::InsufficientStock { requested, available: remaining });
        }

        let new_remaining = remaining.checked_sub(delta).ok_or_else(|| StoreError::Corrupt {
            what: "inventory count",
            detail: format!("{} cannot absorb a change of {}", remaining, -delta),
        })?;
        self.inventory.set_remaining(new_remaining).await?;

        if let Err(e) = self.ledger.upsert(&customer, requested).await {
            error!(error = %e, "Ledger write failed, restoring inventory");
            if let Err(rollback) = self.inventory.set_remaining(remaining).await {
                error!(error = %rollback, remaining, "Inventory rollback failed");
            }
            return Err(e.into());
        }

        info!(previous, requested, remaining = new_remaining, "Order recorded");
        Ok(Placement { previous, requested, remaining: new_remaining })
    }

    #[instrument(skip(self))]
    async fn collect(&mut self, user_id: i64) -> Result<u32, BookError> {
        let quantity = self.ledger.remove(user_id).await?;
        info!(quantity, "Order collected");
        Ok(quantity)
    }

    #[instrument(skip(self))]
    async fn new_batch(&mut self, total: i64) -> Result<(), BookError> {
        self.inventory.set_remaining(total).await?;
        self.ledger.clear().await?;
        info!("New batch started");
        Ok(())
    }

    async fn export(&self) -> Result<Vec<ExportLine>, BookError> {
        Ok(self.ledger.export().await?)
    }
}

#[async_trait]
impl Entity for CookieBook {
    type Action = BookAction;
    type ActionResult = BookActionResult;
    type Error = BookError;

    async fn handle_action(&mut self, action: BookAction) -> Result<BookActionResult, BookError> {
        match action {
            BookAction::Remaining => Ok(BookActionResult::Remaining(self.inventory.get_remaining().await?)),
            BookAction::PlaceOrder { customer, requested } => {
                self.place_order(customer, requested).await.map(BookActionResult::PlaceOrder)
            }
            BookAction::Collect { user_id } => self.collect(user_id).await.map(BookActionResult::Collect),
            BookAction::NewBatch { total } => self.new_batch(total).await.map(BookActionResult::NewBatch),
            BookAction::Export => self.export().await.map(BookActionResult::Export),
        }
    }
}
