// In-memory implementation of WordStore.
//
// Useful for tests and for running the engine without a database. Nothing
// survives a restart, so the defaults get seeded on every start.

use crate::core::moderation::{ModerationError, NewWord, WordEntry, WordList, WordStore};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Word lists kept in a DashMap, one vector per list in insertion order.
pub struct InMemoryWordStore {
    lists: DashMap<WordList, Vec<WordEntry>>,
    // Shared by both lists
    next_id: AtomicI64,
}

impl InMemoryWordStore {
    pub fn new() -> Self {
        Self {
            lists: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryWordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WordStore for InMemoryWordStore {
    async fn load_words(&self, list: WordList) -> Result<Vec<WordEntry>, ModerationError> {
        Ok(self
            .lists
            .get(&list)
            .map(|entries| entries.clone())
            .unwrap_or_default())
    }

    async fn insert_word(
        &self,
        list: WordList,
        word: NewWord,
    ) -> Result<WordEntry, ModerationError> {
        // Holding the entry guard makes the duplicate check and the push atomic
        let mut entries = self.lists.entry(list).or_default();

        if entries.iter().any(|e| e.word == word.word) {
            return Err(ModerationError::Conflict {
                list,
                word: word.word,
            });
        }

        let entry = WordEntry {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            word: word.word,
            category: word.category,
            created_by: word.created_by,
            created_at: Utc::now(),
        };
        entries.push(entry.clone());

        Ok(entry)
    }

    async fn delete_word(&self, list: WordList, id: i64) -> Result<bool, ModerationError> {
        match self.lists.get_mut(&list) {
            Some(mut entries) => {
                let before = entries.len();
                entries.retain(|e| e.id != id);
                Ok(entries.len() != before)
            }
            None => Ok(false),
        }
    }

    async fn count_words(&self, list: WordList) -> Result<u64, ModerationError> {
        Ok(self
            .lists
            .get(&list)
            .map(|entries| entries.len() as u64)
            .unwrap_or(0))
    }
}
