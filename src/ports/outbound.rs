//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, Note, OutgoingMessage, UpdatesPage};

/// Per-user note persistence. Notes are partitioned by `owner` (chat id);
/// ids are store-generated and unique within an owner's live set.
#[async_trait::async_trait]
pub trait NoteStorePort: Send + Sync {
    /// Insert a new note for `owner`. The write is committed before return
    /// and visible to a subsequent `list(owner)`.
    async fn add(&self, owner: i64, text: &str) -> Result<(), DomainError>;

    /// All notes for `owner`, ascending id. Empty vec if none.
    async fn list(&self, owner: i64) -> Result<Vec<Note>, DomainError>;

    /// Replace the content of the note matching both `owner` and `id`.
    /// Silently affects zero rows when no such note exists.
    async fn update(&self, owner: i64, id: i64, text: &str) -> Result<(), DomainError>;

    /// Remove the note matching both `owner` and `id`. No-op if absent.
    async fn delete(&self, owner: i64, id: i64) -> Result<(), DomainError>;
}

/// Telegram Bot API gateway. Pure transport, no business logic.
#[async_trait::async_trait]
pub trait BotGateway: Send + Sync {
    /// Long-poll for updates with id >= `offset` (None = whatever the API
    /// has pending). Held open by the server up to `timeout_secs`.
    async fn fetch_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<UpdatesPage, DomainError>;

    /// Deliver one outbound message. Callers treat failures as best-effort
    /// (log and continue).
    async fn send_message(&self, msg: &OutgoingMessage) -> Result<(), DomainError>;
}
