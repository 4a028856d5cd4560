//! In-memory note store. Implements NoteStorePort without a database.
//!
//! Used as the ephemeral backend (TG_NOTES_EPHEMERAL=1) and as the test
//! double for the use cases. Same contract as the SQLite store: monotonic
//! ids, ascending order, zero-row mutations are silent no-ops.

use crate::domain::{DomainError, Note};
use crate::ports::NoteStorePort;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    next_id: i64,
    notes: HashMap<i64, Vec<Note>>,
}

/// Note store backed by a process-local map. Notes do not survive restart.
#[derive(Default)]
pub struct MemoryNoteStore {
    inner: Mutex<Inner>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl NoteStorePort for MemoryNoteStore {
    async fn add(&self, owner: i64, text: &str) -> Result<(), DomainError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.notes.entry(owner).or_default().push(Note {
            id,
            content: text.to_string(),
        });
        Ok(())
    }

    async fn list(&self, owner: i64) -> Result<Vec<Note>, DomainError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        // Inserted in id order; kept sorted by construction.
        Ok(inner.notes.get(&owner).cloned().unwrap_or_default())
    }

    async fn update(&self, owner: i64, id: i64, text: &str) -> Result<(), DomainError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        if let Some(notes) = inner.notes.get_mut(&owner) {
            if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
                note.content = text.to_string();
            }
        }
        Ok(())
    }

    async fn delete(&self, owner: i64, id: i64) -> Result<(), DomainError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        if let Some(notes) = inner.notes.get_mut(&owner) {
            notes.retain(|n| n.id != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_monotonic_across_owners() {
        let store = MemoryNoteStore::new();
        store.add(1, "a").await.unwrap();
        store.add(2, "b").await.unwrap();
        store.add(1, "c").await.unwrap();
        let one = store.list(1).await.unwrap();
        let two = store.list(2).await.unwrap();
        assert_eq!(one.iter().map(|n| n.id).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(two[0].id, 1);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reassigned() {
        let store = MemoryNoteStore::new();
        store.add(1, "a").await.unwrap();
        store.delete(1, 0).await.unwrap();
        store.add(1, "b").await.unwrap();
        let notes = store.list(1).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, 1);
    }

    #[tokio::test]
    async fn update_missing_note_is_noop() {
        let store = MemoryNoteStore::new();
        store.add(1, "a").await.unwrap();
        store.update(1, 42, "x").await.unwrap();
        store.update(9, 0, "x").await.unwrap();
        assert_eq!(store.list(1).await.unwrap()[0].content, "a");
    }
}
