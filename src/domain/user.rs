/// Identity of the person behind an inbound chat event.
#[derive(Debug, Clone, PartialEq)]
pub struct UserIdentity {
    pub id: i64,
    pub username: Option<String>,
    pub display_name: String,
}

impl UserIdentity {
    /// Creates a new UserIdentity.
    ///
    /// # Notes
    /// An empty username is stored as `None`, matching how the ledger persists it.
    pub fn new(id: i64, username: Option<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.filter(|u| !u.is_empty()),
            display_name: display_name.into(),
        }
    }
}
