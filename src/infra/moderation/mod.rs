// Implementations of the moderation word store.

mod in_memory;
mod sqlite_word_store;

pub use in_memory::InMemoryWordStore;
pub use sqlite_word_store::SqliteWordStore;
