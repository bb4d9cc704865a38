use async_trait::async_trait;
use thiserror::Error;

pub type ChatId = i64;
pub type MessageId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Plain,
    Markdown,
}

/// Inline button attached under a message; pressing it comes back as a callback
/// carrying `callback_data`.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MessengerError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Chat not reachable: {0}")]
    ChatUnreachable(ChatId),
}

/// Outbound half of a chat transport.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        mode: ParseMode,
        button: Option<Button>,
    ) -> Result<MessageId, MessengerError>;

    async fn edit_message(&self, chat: ChatId, message: MessageId, text: &str) -> Result<(), MessengerError>;

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), MessengerError>;

    async fn answer_callback(&self, callback_id: &str) -> Result<(), MessengerError>;
}
