use tracing::{debug, instrument, warn};

use crate::domain::{ExportLine, OrderRecord, UserIdentity};
use crate::ledger::codec::{decode_line, LedgerLine};
use crate::storage::{Storage, StoreError};

/// Per-customer order lines of the current batch, at most one per user id.
pub struct OrderLedger {
    storage: Box<dyn Storage>,
}

impl OrderLedger {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self { storage: Box::new(storage) }
    }

    async fn load(&self) -> Result<Vec<LedgerLine>, StoreError> {
        let contents = self.storage.read_all().await?.unwrap_or_default();
        Ok(contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(decode_line)
            .collect())
    }

    async fn save(&self, lines: &[LedgerLine]) -> Result<(), StoreError> {
        let mut contents = String::new();
        for line in lines {
            contents.push_str(&line.encode());
            contents.push('\n');
        }
        self.storage.write_all(&contents).await
    }

    /// Well-formed records in file order.
    pub async fn records(&self) -> Result<Vec<OrderRecord>, StoreError> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter_map(|line| match line {
                LedgerLine::Record(record) => Some(record),
                LedgerLine::Malformed { raw, .. } => {
                    warn!(line = %raw, "Skipping malformed ledger line");
                    None
                }
            })
            .collect())
    }

    /// Quantity on record for `user_id`, 0 when absent or malformed.
    #[instrument(skip(self))]
    pub async fn get_quantity(&self, user_id: i64) -> Result<u32, StoreError> {
        let quantity = self
            .load()
            .await?
            .into_iter()
            .find_map(|line| match line {
                LedgerLine::Record(record) if record.user_id == user_id => Some(record.quantity),
                _ => None,
            })
            .unwrap_or(0);
        debug!(quantity, "Existing quantity");
        Ok(quantity)
    }

    /// Replaces the customer's line in place, or appends one.
    ///
    /// Any further lines for the same user are dropped so a single record remains.
    #[instrument(skip(self), fields(user_id = customer.id))]
    pub async fn upsert(&self, customer: &UserIdentity, quantity: u32) -> Result<(), StoreError> {
        let record = LedgerLine::Record(OrderRecord::for_customer(customer, quantity));
        let mut lines = Vec::new();
        let mut replaced = false;
        for line in self.load().await? {
            if line.user_id() != Some(customer.id) {
                lines.push(line);
            } else if !replaced {
                lines.push(record.clone());
                replaced = true;
            }
        }
        if !replaced {
            lines.push(record);
        }
        debug!(replaced, "Writing order line");
        self.save(&lines).await
    }

    /// Deletes the customer's line(s) and returns the quantity they held.
    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: i64) -> Result<u32, StoreError> {
        let (removed, kept): (Vec<LedgerLine>, Vec<LedgerLine>) = self
            .load()
            .await?
            .into_iter()
            .partition(|line| line.user_id() == Some(user_id));

        let quantity = removed
            .iter()
            .map(|line| match line {
                LedgerLine::Record(record) => record.quantity,
                LedgerLine::Malformed { .. } => 0,
            })
            .sum::<u32>();
        self.save(&kept).await?;
        debug!(quantity, "Order line removed");
        Ok(quantity)
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove().await
    }

    pub async fn export(&self) -> Result<Vec<ExportLine>, StoreError> {
        Ok(self.records().await?.iter().map(ExportLine::from).collect())
    }
}
