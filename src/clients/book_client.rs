use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::book_actor::{BookAction, BookActionResult, BookError, CookieBook, Placement};
use crate::domain::{ExportLine, UserIdentity};

/// Client for interacting with the CookieBook actor.
#[derive(Clone)]
pub struct BookClient {
    inner: ResourceClient<CookieBook>,
}

impl BookClient {
    pub fn new(inner: ResourceClient<CookieBook>) -> Self {
        Self { inner }
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.inner.shutdown().await
    }
}

book_request!(BookClient => fn remaining() -> i64 as BookAction::Remaining => Remaining);
book_request!(BookClient => fn place_order(customer: UserIdentity, requested: u32) -> Placement
    as BookAction::PlaceOrder { customer, requested } => PlaceOrder);
book_request!(BookClient => fn collect(user_id: i64) -> u32 as BookAction::Collect { user_id } => Collect);
book_request!(BookClient => fn new_batch(total: i64) -> () as BookAction::NewBatch { total } => NewBatch);
book_request!(BookClient => fn export() -> Vec<ExportLine> as BookAction::Export => Export);
