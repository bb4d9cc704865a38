use crate::bot::messenger::{ChatId, MessageId};
use crate::domain::UserIdentity;

/// Inbound event delivered by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Message {
        chat: ChatId,
        message_id: MessageId,
        from: UserIdentity,
        text: String,
    },
    Callback {
        id: String,
        chat: ChatId,
        message_id: MessageId,
        from: UserIdentity,
        data: String,
    },
}

impl Update {
    pub fn chat(&self) -> ChatId {
        match self {
            Update::Message { chat, .. } | Update::Callback { chat, .. } => *chat,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    NewBatch(Vec<String>),
    Export,
    Unknown(String),
}

impl Command {
    /// Parses `/name[@bot] args...`; returns `None` for text that is not a command.
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let head = words.next()?.strip_prefix('/')?;
        let name = head.split('@').next().unwrap_or_default();
        let args: Vec<String> = words.map(str::to_string).collect();

        Some(match name {
            "start" => Command::Start,
            "newbatch" => Command::NewBatch(args),
            "export" => Command::Export,
            other => Command::Unknown(other.to_string()),
        })
    }
}

/// Quantity typed by a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityInput {
    Valid(u32),
    /// All digits, but beyond what any batch could hold.
    TooLarge,
    NotANumber,
}

impl QuantityInput {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return QuantityInput::NotANumber;
        }
        match text.parse::<u32>() {
            Ok(n) => QuantityInput::Valid(n),
            Err(_) => QuantityInput::TooLarge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/start@CookieBot start"), Some(Command::Start));
        assert_eq!(Command::parse("/newbatch 60"), Some(Command::NewBatch(vec!["60".into()])));
        assert_eq!(Command::parse("/export"), Some(Command::Export));
        assert_eq!(Command::parse("/help"), Some(Command::Unknown("help".into())));
        assert_eq!(Command::parse("5"), None);
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(QuantityInput::parse(" 12 "), QuantityInput::Valid(12));
        assert_eq!(QuantityInput::parse("0"), QuantityInput::Valid(0));
        assert_eq!(QuantityInput::parse("-3"), QuantityInput::NotANumber);
        assert_eq!(QuantityInput::parse("two"), QuantityInput::NotANumber);
        assert_eq!(QuantityInput::parse("1.5"), QuantityInput::NotANumber);
        assert_eq!(QuantityInput::parse("99999999999999999999"), QuantityInput::TooLarge);
    }
}
