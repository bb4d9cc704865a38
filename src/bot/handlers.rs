use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::app_system::BotConfig;
use crate::book_actor::BookError;
use crate::bot::messenger::{Button, ChatId, MessageId, Messenger, MessengerError, ParseMode};
use crate::bot::texts;
use crate::bot::update::{Command, QuantityInput, Update};
use crate::clients::BookClient;
use crate::domain::UserIdentity;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Book error: {0}")]
    Book(#[from] BookError),
    #[error("Messenger error: {0}")]
    Messenger(#[from] MessengerError),
}

/// Routes inbound updates to the cookie book and answers through a [`Messenger`].
///
/// Sold-out notices, batch announcements and the cleanup of the admin's
/// `/newbatch` message are best-effort: a failure is logged and the update
/// still counts as handled.
pub struct CookieBot<M: Messenger> {
    book: BookClient,
    messenger: Arc<M>,
    config: Arc<BotConfig>,
}

impl<M: Messenger> CookieBot<M> {
    pub fn new(book: BookClient, messenger: Arc<M>, config: Arc<BotConfig>) -> Self {
        Self { book, messenger, config }
    }

    #[instrument(skip(self, update), fields(chat = update.chat()))]
    pub async fn handle(&self, update: Update) -> Result<(), BotError> {
        let chat = update.chat();
        let result = match update {
            Update::Message { chat, message_id, from, text } => match Command::parse(&text) {
                Some(Command::Start) => self.start(chat).await,
                Some(Command::NewBatch(args)) => self.new_batch(chat, message_id, &from, &args).await,
                Some(Command::Export) => self.export(chat, &from).await,
                Some(Command::Unknown(name)) => {
                    debug!(command = %name, "Ignoring unknown command");
                    Ok(())
                }
                None => self.place_order(chat, from, &text).await,
            },
            Update::Callback { id, chat, message_id, from, data } => {
                self.callback(&id, chat, message_id, &from, &data).await
            }
        };

        match result {
            Err(BotError::Book(BookError::Store(e))) => {
                error!(error = %e, "Storage failure while handling update");
                self.reply(chat, texts::STORAGE_FAILURE).await
            }
            other => other,
        }
    }

    async fn start(&self, chat: ChatId) -> Result<(), BotError> {
        let remaining = self.book.remaining().await?;
        self.reply(chat, &texts::welcome(remaining, &self.config.pickup_address)).await
    }

    #[instrument(skip(self, customer, text), fields(user_id = customer.id))]
    async fn place_order(&self, chat: ChatId, customer: UserIdentity, text: &str) -> Result<(), BotError> {
        let requested = match QuantityInput::parse(text) {
            QuantityInput::Valid(n) => n,
            QuantityInput::NotANumber => return self.reply(chat, texts::ONLY_A_NUMBER).await,
            QuantityInput::TooLarge => {
                let remaining = self.book.remaining().await?;
                return self.reply(chat, &texts::only_available(remaining)).await;
            }
        };

        let placement = match self.book.place_order(customer, requested).await {
            Ok(placement) => placement,
            Err(BookError::InsufficientStock { available, .. }) => {
                return self.reply(chat, &texts::only_available(available)).await;
            }
            Err(e) => return Err(e.into()),
        };

        let button = Button {
            label: texts::DONE_BUTTON.to_string(),
            callback_data: texts::DONE_CALLBACK.to_string(),
        };
        let text = texts::order_recorded(&self.config.pickup_address);
        self.messenger.send_message(chat, &text, ParseMode::Plain, Some(button)).await?;

        if placement.sold_out() {
            info!("Batch sold out");
            self.announce(texts::SOLD_OUT, ParseMode::Plain).await;
        }
        Ok(())
    }

    async fn callback(
        &self,
        callback_id: &str,
        chat: ChatId,
        message_id: MessageId,
        from: &UserIdentity,
        data: &str,
    ) -> Result<(), BotError> {
        self.messenger.answer_callback(callback_id).await?;

        if data != texts::DONE_CALLBACK {
            debug!(data, "Ignoring unknown callback");
            return Ok(());
        }

        self.book.collect(from.id).await?;
        self.messenger.edit_message(chat, message_id, texts::THANKS_FOR_COLLECTING).await?;
        Ok(())
    }

    #[instrument(skip(self, from, args), fields(user_id = from.id))]
    async fn new_batch(
        &self,
        chat: ChatId,
        message_id: MessageId,
        from: &UserIdentity,
        args: &[String],
    ) -> Result<(), BotError> {
        if from.id != self.config.admin_id {
            warn!("Unauthorized /newbatch");
            return self.reply(chat, texts::ADMIN_ONLY).await;
        }

        let total = match args {
            [arg] if arg.bytes().all(|b| b.is_ascii_digit()) => arg.parse::<i64>().ok(),
            _ => None,
        };
        let Some(total) = total else {
            return self.reply(chat, texts::NEW_BATCH_USAGE).await;
        };

        self.book.new_batch(total).await?;
        info!(total, "New batch opened");

        if let Err(e) = self.messenger.delete_message(chat, message_id).await {
            warn!(error = %e, "Failed to delete /newbatch message");
        }

        let announcement = texts::new_batch_announcement(
            total,
            &self.config.pickup_address,
            self.config.order_link.as_deref(),
        );
        self.announce(&announcement, ParseMode::Markdown).await;
        Ok(())
    }

    async fn export(&self, chat: ChatId, from: &UserIdentity) -> Result<(), BotError> {
        if from.id != self.config.admin_id {
            warn!(user_id = from.id, "Unauthorized /export");
            return self.reply(chat, texts::ADMIN_ONLY).await;
        }

        let lines = self.book.export().await?;
        self.messenger
            .send_message(chat, &texts::report(&lines), ParseMode::Markdown, None)
            .await?;
        Ok(())
    }

    async fn announce(&self, text: &str, mode: ParseMode) {
        let Some(channel) = self.config.announce_chat_id else {
            debug!("No announce chat configured");
            return;
        };
        if let Err(e) = self.messenger.send_message(channel, text, mode, None).await {
            error!(error = %e, channel, "Failed to send announcement");
        }
    }

    async fn reply(&self, chat: ChatId, text: &str) -> Result<(), BotError> {
        self.messenger.send_message(chat, text, ParseMode::Plain, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_system::CookieSystem;
    use crate::mock_framework::{start_book, RecordingMessenger, Sent};
    use crate::storage::{Storage, StoreError};

    const ADMIN: i64 = 900;
    const CHANNEL: i64 = -100;

    fn config() -> BotConfig {
        BotConfig {
            admin_id: ADMIN,
            announce_chat_id: Some(CHANNEL),
            ..BotConfig::default()
        }
    }

    fn message(from: i64, text: &str) -> Update {
        Update::Message {
            chat: from,
            message_id: 1,
            from: UserIdentity::new(from, None, format!("user{}", from)),
            text: text.to_string(),
        }
    }

    fn bot(total: i64, messenger: Arc<RecordingMessenger>) -> CookieBot<RecordingMessenger> {
        let book = start_book(total);
        CookieBot::new(book, messenger, Arc::new(config()))
    }

    #[tokio::test]
    async fn test_non_numeric_text_prompts_for_a_number() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(60, messenger.clone());

        bot.handle(message(1, "lots please")).await.unwrap();

        assert_eq!(messenger.texts_to(1), vec![texts::ONLY_A_NUMBER.to_string()]);
    }

    #[tokio::test]
    async fn test_order_reply_carries_done_button() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(60, messenger.clone());

        bot.handle(message(1, "5")).await.unwrap();

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            Sent::Message { chat, button, .. } => {
                assert_eq!(*chat, 1);
                assert_eq!(button.as_ref().map(|b| b.callback_data.as_str()), Some(texts::DONE_CALLBACK));
            }
            other => panic!("Unexpected send: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_over_capacity_reports_remaining() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(4, messenger.clone());

        bot.handle(message(1, "5")).await.unwrap();
        bot.handle(message(1, "99999999999999999999")).await.unwrap();

        assert_eq!(
            messenger.texts_to(1),
            vec![texts::only_available(4), texts::only_available(4)]
        );
    }

    #[tokio::test]
    async fn test_sold_out_is_announced_on_every_order_that_leaves_zero() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(3, messenger.clone());

        bot.handle(message(1, "2")).await.unwrap();
        assert!(messenger.texts_to(CHANNEL).is_empty());

        bot.handle(message(1, "3")).await.unwrap();
        bot.handle(message(1, "3")).await.unwrap();

        assert_eq!(messenger.texts_to(CHANNEL), vec![texts::SOLD_OUT.to_string(); 2]);
    }

    #[tokio::test]
    async fn test_zero_order_gets_the_regular_confirmation() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(60, messenger.clone());

        bot.handle(message(1, "0")).await.unwrap();

        match &messenger.sent()[0] {
            Sent::Message { chat, text, button, .. } => {
                assert_eq!(*chat, 1);
                assert_eq!(*text, texts::order_recorded(&BotConfig::default().pickup_address));
                assert!(button.is_some());
            }
            other => panic!("Unexpected send: {:?}", other),
        }
    }

    struct BrokenStorage;

    #[async_trait::async_trait]
    impl Storage for BrokenStorage {
        async fn read_all(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::Internal("disk unavailable".into()))
        }

        async fn write_all(&self, _contents: &str) -> Result<(), StoreError> {
            Err(StoreError::Internal("disk unavailable".into()))
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_answered_not_propagated() {
        let messenger = Arc::new(RecordingMessenger::default());
        let system = CookieSystem::with_storage(BrokenStorage, BrokenStorage, 60);
        let bot = CookieBot::new(system.book_client.clone(), messenger.clone(), Arc::new(config()));

        bot.handle(message(1, "5")).await.unwrap();
        bot.handle(message(1, "/start")).await.unwrap();

        assert_eq!(
            messenger.texts_to(1),
            vec![texts::STORAGE_FAILURE.to_string(), texts::STORAGE_FAILURE.to_string()]
        );
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_announcement_does_not_fail_the_order() {
        let messenger = Arc::new(RecordingMessenger::failing_for(CHANNEL));
        let bot = bot(3, messenger.clone());

        bot.handle(message(1, "3")).await.unwrap();

        assert_eq!(messenger.texts_to(1).len(), 1);
        assert!(messenger.texts_to(CHANNEL).is_empty());
    }

    #[tokio::test]
    async fn test_admin_commands_are_restricted() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(60, messenger.clone());

        bot.handle(message(1, "/newbatch 10")).await.unwrap();
        bot.handle(message(1, "/export")).await.unwrap();

        assert_eq!(
            messenger.texts_to(1),
            vec![texts::ADMIN_ONLY.to_string(), texts::ADMIN_ONLY.to_string()]
        );
    }

    #[tokio::test]
    async fn test_new_batch_requires_one_numeric_argument() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(60, messenger.clone());

        for text in ["/newbatch", "/newbatch ten", "/newbatch 10 20", "/newbatch -5"] {
            bot.handle(message(ADMIN, text)).await.unwrap();
        }

        assert_eq!(messenger.texts_to(ADMIN), vec![texts::NEW_BATCH_USAGE.to_string(); 4]);
    }

    #[tokio::test]
    async fn test_new_batch_deletes_command_and_announces() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(60, messenger.clone());

        bot.handle(message(ADMIN, "/newbatch 24")).await.unwrap();

        let sent = messenger.sent();
        assert_eq!(sent[0], Sent::Delete { chat: ADMIN, message: 1 });
        match &sent[1] {
            Sent::Message { chat, text, mode, .. } => {
                assert_eq!(*chat, CHANNEL);
                assert_eq!(*mode, ParseMode::Markdown);
                assert!(text.contains("24 cookies"));
            }
            other => panic!("Unexpected send: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_done_callback_edits_message() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(60, messenger.clone());
        bot.handle(message(1, "2")).await.unwrap();

        bot.handle(Update::Callback {
            id: "cb-1".into(),
            chat: 1,
            message_id: 7,
            from: UserIdentity::new(1, None, "user1"),
            data: texts::DONE_CALLBACK.into(),
        })
        .await
        .unwrap();

        let sent = messenger.sent();
        assert_eq!(sent[1], Sent::Answer { callback_id: "cb-1".into() });
        assert_eq!(
            sent[2],
            Sent::Edit { chat: 1, message: 7, text: texts::THANKS_FOR_COLLECTING.into() }
        );
    }

    #[tokio::test]
    async fn test_unknown_command_is_ignored() {
        let messenger = Arc::new(RecordingMessenger::default());
        let bot = bot(60, messenger.clone());

        bot.handle(message(1, "/help")).await.unwrap();

        assert!(messenger.sent().is_empty());
    }
}
