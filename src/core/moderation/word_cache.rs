// In-memory snapshot of both word lists.
//
// Readers load an Arc to an immutable snapshot; refresh builds a new one
// and swaps it in, so a check never sees half of an update.

use super::moderation_models::WordEntry;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Lower-cased words of both lists at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSnapshot {
    /// Store order is kept for display
    pub banned: Vec<String>,
    pub suspicious: Vec<String>,
}

impl WordSnapshot {
    pub fn from_entries(banned: &[WordEntry], suspicious: &[WordEntry]) -> Self {
        Self {
            banned: banned.iter().map(|e| e.word.to_lowercase()).collect(),
            suspicious: suspicious.iter().map(|e| e.word.to_lowercase()).collect(),
        }
    }
}

/// Holder for the current snapshot.
#[derive(Debug)]
pub struct WordCache {
    current: ArcSwap<WordSnapshot>,
}

impl WordCache {
    /// Start with empty lists.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(WordSnapshot::default()),
        }
    }

    /// Current snapshot (lock-free).
    #[inline]
    pub fn load(&self) -> Arc<WordSnapshot> {
        self.current.load_full()
    }

    /// Replace the snapshot; readers holding the old one keep it.
    pub fn replace(&self, snapshot: WordSnapshot) {
        self.current.store(Arc::new(snapshot));
    }
}

impl Default for WordCache {
    fn default() -> Self {
        Self::new()
    }
}
