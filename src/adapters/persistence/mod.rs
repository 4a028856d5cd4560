pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryNoteStore;
pub use sqlite_store::SqliteNoteStore;
