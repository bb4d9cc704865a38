//! Line format of the order ledger: `user_id,username,display_name,quantity`.
//!
//! Backslash, comma, CR and LF inside a field are written escaped (`\\`, `\,`,
//! `\r`, `\n`). Lines written without escapes parse the same as before.

use crate::domain::OrderRecord;

const FIELD_COUNT: usize = 4;

/// One line of the ledger file as read back.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerLine {
    Record(OrderRecord),
    /// Wrong field count or unparsable numbers. Kept verbatim so rewrites do
    /// not lose it; `user_id` is set when the first field is still a number.
    Malformed { user_id: Option<i64>, raw: String },
}

impl LedgerLine {
    pub fn user_id(&self) -> Option<i64> {
        match self {
            LedgerLine::Record(record) => Some(record.user_id),
            LedgerLine::Malformed { user_id, .. } => *user_id,
        }
    }

    pub fn encode(&self) -> String {
        match self {
            LedgerLine::Record(record) => encode_record(record),
            LedgerLine::Malformed { raw, .. } => raw.clone(),
        }
    }
}

pub fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => current.push('\n'),
                Some('r') => current.push('\r'),
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            ',' => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

pub fn encode_record(record: &OrderRecord) -> String {
    format!(
        "{},{},{},{}",
        record.user_id,
        escape_field(record.username.as_deref().unwrap_or("")),
        escape_field(&record.display_name),
        record.quantity
    )
}

pub fn decode_line(line: &str) -> LedgerLine {
    let raw = line.trim_end_matches(&['\r', '\n'][..]);
    let fields = split_fields(raw);
    let user_id = fields.first().and_then(|f| f.trim().parse::<i64>().ok());

    if fields.len() == FIELD_COUNT {
        if let (Some(user_id), Ok(quantity)) = (user_id, fields[3].trim().parse::<u32>()) {
            return LedgerLine::Record(OrderRecord::new(
                user_id,
                Some(fields[1].clone()),
                fields[2].clone(),
                quantity,
            ));
        }
    }

    LedgerLine::Malformed { user_id, raw: raw.to_string() }
}
