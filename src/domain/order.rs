use crate::domain::UserIdentity;

/// One customer's standing pre-order for the current batch.
///
/// `quantity` is the customer's current total, not an increment.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub display_name: String,
    pub quantity: u32,
}

impl OrderRecord {
    pub fn new(
        user_id: i64,
        username: Option<String>,
        display_name: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            user_id,
            username: username.filter(|u| !u.is_empty()),
            display_name: display_name.into(),
            quantity,
        }
    }

    pub fn for_customer(customer: &UserIdentity, quantity: u32) -> Self {
        Self::new(customer.id, customer.username.clone(), customer.display_name.clone(), quantity)
    }

    /// Markdown mention of the customer: a profile link when a username is
    /// known, otherwise an id-based mention labelled with the display name.
    pub fn mention(&self) -> String {
        match &self.username {
            Some(username) => format!("[@{}](https://t.me/{})", username, username),
            None => format!("[{}](tg://user?id={})", self.display_name, self.user_id),
        }
    }
}

/// A single row of the admin report.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportLine {
    pub display: String,
    pub quantity: u32,
}

impl From<&OrderRecord> for ExportLine {
    fn from(record: &OrderRecord) -> Self {
        Self {
            display: record.mention(),
            quantity: record.quantity,
        }
    }
}
