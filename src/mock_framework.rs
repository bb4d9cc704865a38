//! # Mock Framework
//!
//! Utilities for testing clients and the bot in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then
//! [`expect_action`] to assert what the client sent. [`RecordingMessenger`]
//! stands in for the chat transport.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest};
use crate::app_system::CookieSystem;
use crate::bot::{Button, ChatId, MessageId, Messenger, MessengerError, ParseMode};
use crate::clients::BookClient;
use crate::storage::InMemoryStorage;

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Action, oneshot::Sender<Result<T::ActionResult, T::Error>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Spawns a live book actor over fresh in-memory storage.
pub fn start_book(total: i64) -> BookClient {
    CookieSystem::with_storage(InMemoryStorage::new(), InMemoryStorage::new(), total).book_client
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Message {
        chat: ChatId,
        text: String,
        mode: ParseMode,
        button: Option<Button>,
    },
    Edit {
        chat: ChatId,
        message: MessageId,
        text: String,
    },
    Delete {
        chat: ChatId,
        message: MessageId,
    },
    Answer {
        callback_id: String,
    },
}

/// Messenger that records every successful call. Messages to `failing_chat`
/// fail with a transport error and are not recorded.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    failing_chat: Option<ChatId>,
    next_id: AtomicI64,
}

impl RecordingMessenger {
    pub fn failing_for(chat: ChatId) -> Self {
        Self {
            failing_chat: Some(chat),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts of plain messages sent to `chat`, in order.
    pub fn texts_to(&self, chat: ChatId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Message { chat: to, text, .. } if to == chat => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }

    fn check(&self, chat: ChatId) -> Result<(), MessengerError> {
        if self.failing_chat == Some(chat) {
            return Err(MessengerError::ChatUnreachable(chat));
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        mode: ParseMode,
        button: Option<Button>,
    ) -> Result<MessageId, MessengerError> {
        self.check(chat)?;
        self.record(Sent::Message { chat, text: text.to_string(), mode, button });
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn edit_message(&self, chat: ChatId, message: MessageId, text: &str) -> Result<(), MessengerError> {
        self.check(chat)?;
        self.record(Sent::Edit { chat, message, text: text.to_string() });
        Ok(())
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), MessengerError> {
        self.check(chat)?;
        self.record(Sent::Delete { chat, message });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), MessengerError> {
        self.record(Sent::Answer { callback_id: callback_id.to_string() });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book_actor::{BookAction, BookActionResult, CookieBook};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<CookieBook>(10);

        let task = tokio::spawn(async move { client.perform_action(BookAction::Remaining).await });

        let (action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert!(matches!(action, BookAction::Remaining));
        responder.send(Ok(BookActionResult::Remaining(12))).unwrap();

        assert!(matches!(task.await.unwrap(), Ok(BookActionResult::Remaining(12))));
    }
}
