// Listing moderation engine.
//
// **Architecture Overview:**
// - `core/` = Business logic (rules, word cache, admin operations)
// - `infra/` = Implementations of core traits (in-memory, SQLite)
//
// The binary in main.rs wires these together.

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;
#[path = "infra/infra_layer.rs"]
pub mod infra;

pub use crate::core::moderation::{
    ListingDraft, ListingStatus, ModerationConfig, ModerationError, ModerationService,
    ModerationVerdict, NewWord, ReviewFlag, WordEntry, WordList, WordStore,
};
pub use crate::infra::moderation::{InMemoryWordStore, SqliteWordStore};
