//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/SQL types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};

/// One stored note. Ids are assigned by the store and are unique within an
/// owner's live set; listing order is ascending id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub content: String,
}

/// The processable part of an inbound update: who wrote, and what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Telegram chat id. Doubles as the note owner (partition key).
    pub chat_id: i64,
    pub text: String,
}

/// One inbound event from the gateway. Consumed once and discarded.
///
/// `message` is `None` when the wire update carried no text message
/// (edited messages, stickers, channel posts, ...). Those are skipped.
#[derive(Debug, Clone)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

/// Parsed result of one getUpdates long poll.
#[derive(Debug, Clone, Default)]
pub struct UpdatesPage {
    pub ok: bool,
    pub updates: Vec<Update>,
    /// Error description the API attaches to non-ok responses.
    pub description: Option<String>,
}

/// Quick-reply keyboard: one single-button row per note id, collapsing
/// after first use. Serializes to the Bot API `ReplyKeyboardMarkup` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    pub keyboard: Vec<Vec<String>>,
    pub one_time_keyboard: bool,
}

/// Outbound reply: text, target chat, optional keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Option<ReplyKeyboard>,
}
