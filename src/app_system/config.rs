use std::path::PathBuf;
use thiserror::Error;

use crate::bot::ChatId;

pub const DEFAULT_TOTAL_COOKIES: i64 = 60;
pub const INVENTORY_FILE: &str = "cookie_count.txt";
pub const ORDERS_FILE: &str = "orders.txt";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment.
///
/// | Variable | Required | Default |
/// |---|---|---|
/// | `ADMIN_ID` | yes | |
/// | `ANNOUNCE_CHAT_ID` | no | no announcements |
/// | `TOTAL_COOKIES` | no | 60 |
/// | `COOKIE_DATA_DIR` | no | `.` |
/// | `PICKUP_ADDRESS` | no | "the bakery door" |
/// | `ORDER_LINK` | no | none |
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub admin_id: i64,
    pub announce_chat_id: Option<ChatId>,
    /// Initial count written when no inventory file exists yet.
    pub total_cookies: i64,
    pub data_dir: PathBuf,
    pub pickup_address: String,
    pub order_link: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            admin_id: 0,
            announce_chat_id: None,
            total_cookies: DEFAULT_TOTAL_COOKIES,
            data_dir: PathBuf::from("."),
            pickup_address: "the bakery door".to_string(),
            order_link: None,
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let admin_id = get("ADMIN_ID").ok_or(ConfigError::Missing("ADMIN_ID"))?;
        let admin_id = parse_int("ADMIN_ID", &admin_id)?;
        let announce_chat_id = get("ANNOUNCE_CHAT_ID")
            .map(|v| parse_int("ANNOUNCE_CHAT_ID", &v))
            .transpose()?;
        let total_cookies = get("TOTAL_COOKIES")
            .map(|v| parse_int("TOTAL_COOKIES", &v))
            .transpose()?
            .unwrap_or(defaults.total_cookies);

        Ok(Self {
            admin_id,
            announce_chat_id,
            total_cookies,
            data_dir: get("COOKIE_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            pickup_address: get("PICKUP_ADDRESS").unwrap_or(defaults.pickup_address),
            order_link: get("ORDER_LINK"),
        })
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join(INVENTORY_FILE)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(ORDERS_FILE)
    }
}

fn parse_int(name: &'static str, value: &str) -> Result<i64, ConfigError> {
    value.trim().parse::<i64>().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
