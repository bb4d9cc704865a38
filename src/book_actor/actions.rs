use crate::domain::{ExportLine, UserIdentity};

/// Custom actions for the cookie book.
#[derive(Debug, Clone)]
pub enum BookAction {
    /// Reads the remaining count without modifying it.
    Remaining,
    /// Sets the customer's order total to `requested`.
    ///
    /// # Errors
    /// Fails without touching either store when the increase exceeds what remains.
    PlaceOrder { customer: UserIdentity, requested: u32 },
    /// Removes the customer's order after pickup. The quantity is not returned
    /// to inventory.
    Collect { user_id: i64 },
    /// Starts a new batch: sets the counter and wipes every order.
    NewBatch { total: i64 },
    /// Produces the admin report lines.
    Export,
}

/// Results from BookActions - variants match 1:1 with BookAction
#[derive(Debug, Clone)]
pub enum BookActionResult {
    Remaining(i64),
    PlaceOrder(Placement),
    /// Quantity the collected order held
    Collect(u32),
    NewBatch(()),
    Export(Vec<ExportLine>),
}

/// Outcome of an accepted placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub previous: u32,
    pub requested: u32,
    pub remaining: i64,
}

impl Placement {
    /// True when nothing is left after this placement.
    pub fn sold_out(&self) -> bool {
        self.remaining == 0
    }
}
