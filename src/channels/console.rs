//! Drives the bot from stdin and prints replies to stdout.
//!
//! Each input line is `<user_id>[@username]: <text>`. Text starting with `!`
//! presses the button of the last message that carried one in that chat,
//! e.g. `1001: !done`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, warn};

use crate::bot::{Button, ChatId, CookieBot, MessageId, Messenger, MessengerError, ParseMode, Update};
use crate::domain::UserIdentity;

#[derive(Debug, Default)]
pub struct ConsoleMessenger {
    next_id: AtomicI64,
    last_button: Mutex<HashMap<ChatId, MessageId>>,
}

impl ConsoleMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> MessageId {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn last_button_message(&self, chat: ChatId) -> Option<MessageId> {
        self.last_button.lock().ok()?.get(&chat).copied()
    }
}

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        mode: ParseMode,
        button: Option<Button>,
    ) -> Result<MessageId, MessengerError> {
        let id = self.allocate_id();
        println!("[chat {} #{}] {}", chat, id, text);
        if let Some(button) = button {
            println!("  [{}] type `{}: !{}`", button.label, chat, button.callback_data);
            self.last_button
                .lock()
                .map_err(|e| MessengerError::Transport(e.to_string()))?
                .insert(chat, id);
        }
        debug!(?mode, "Printed message");
        Ok(id)
    }

    async fn edit_message(&self, chat: ChatId, message: MessageId, text: &str) -> Result<(), MessengerError> {
        println!("[chat {} #{} edited] {}", chat, message, text);
        Ok(())
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), MessengerError> {
        println!("[chat {} #{} deleted]", chat, message);
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), MessengerError> {
        debug!(callback_id, "Callback answered");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleBody {
    Text(String),
    Press(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleLine {
    pub from: UserIdentity,
    pub body: ConsoleBody,
}

pub fn parse_line(line: &str) -> Option<ConsoleLine> {
    let (sender, text) = line.split_once(':')?;
    let (id, username) = match sender.trim().split_once('@') {
        Some((id, username)) => (id, Some(username.trim().to_string())),
        None => (sender.trim(), None),
    };
    let id = id.trim().parse::<i64>().ok()?;
    let display_name = username.clone().unwrap_or_else(|| format!("user{}", id));
    let text = text.trim();

    let body = match text.strip_prefix('!') {
        Some(data) => ConsoleBody::Press(data.trim().to_string()),
        None => ConsoleBody::Text(text.to_string()),
    };
    Some(ConsoleLine {
        from: UserIdentity::new(id, username, display_name),
        body,
    })
}

/// Reads stdin until EOF, handing every line to the bot.
pub async fn run_console(bot: &CookieBot<ConsoleMessenger>, messenger: &ConsoleMessenger) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut presses = 0u64;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(input) = parse_line(&line) else {
            warn!(line = %line, "Expected `<user_id>[@username]: <text>`");
            continue;
        };

        let chat = input.from.id;
        let update = match input.body {
            ConsoleBody::Text(text) => Update::Message {
                chat,
                message_id: messenger.allocate_id(),
                from: input.from,
                text,
            },
            ConsoleBody::Press(data) => {
                presses += 1;
                Update::Callback {
                    id: format!("console-{}", presses),
                    chat,
                    message_id: messenger.last_button_message(chat).unwrap_or_default(),
                    from: input.from,
                    data,
                }
            }
        };

        if let Err(e) = bot.handle(update).await {
            error!(error = %e, "Failed to handle update");
        }
    }
    Ok(())
}
