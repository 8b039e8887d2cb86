// Listing moderation service - core business logic for risk scoring.
//
// This service handles:
// - Keeping an in-memory snapshot of the banned/suspicious word lists
// - Seeding default words into an empty store
// - Evaluating listings against the rule set
// - Word-list administration (add, bulk add, remove, list)
//
// NO storage or transport dependencies here - just pure domain logic.

use super::category_labels::category_catalog;
use super::content_rules::ContentRules;
use super::default_words::default_words;
use super::moderation_config::ModerationConfig;
use super::moderation_models::{
    CategoryCatalog, ListingDraft, ModerationVerdict, NewWord, WordEntry, WordList,
};
use super::word_cache::{WordCache, WordSnapshot};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("'{word}' already exists in the {list} word list")]
    Conflict { list: WordList, word: String },

    #[error("No {list} word with id {id}")]
    NotFound { list: WordList, id: i64 },

    #[error("Word store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for persisting the two word lists.
///
/// Implementations keep `word` unique per list and report a duplicate insert
/// as `ModerationError::Conflict`.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Every word in a list, in insertion order.
    async fn load_words(&self, list: WordList) -> Result<Vec<WordEntry>, ModerationError>;

    /// Insert a word, assigning its id and creation time.
    async fn insert_word(&self, list: WordList, word: NewWord)
        -> Result<WordEntry, ModerationError>;

    /// Delete by id. Returns false if there was no such word.
    async fn delete_word(&self, list: WordList, id: i64) -> Result<bool, ModerationError>;

    /// Number of words in a list.
    async fn count_words(&self, list: WordList) -> Result<u64, ModerationError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Moderation service for scoring listings and managing word lists.
pub struct ModerationService<S: WordStore> {
    store: S,
    rules: ContentRules,
    cache: WordCache,
    // Serializes admin mutations together with the refresh they trigger
    admin_lock: Mutex<()>,
}

impl<S: WordStore> ModerationService<S> {
    /// Create a service with an empty cache. Call `initialize` before use.
    pub fn new(store: S, config: ModerationConfig) -> Result<Self, ModerationError> {
        Ok(Self {
            store,
            rules: ContentRules::new(config)?,
            cache: WordCache::new(),
            admin_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &ModerationConfig {
        self.rules.config()
    }

    /// Seed empty lists with the defaults, then load the cache.
    ///
    /// Individual seed inserts that fail (duplicates from a concurrent or
    /// partial seed) are logged and skipped.
    pub async fn initialize(&self) -> Result<(), ModerationError> {
        let _guard = self.admin_lock.lock().await;

        for list in [WordList::Banned, WordList::Suspicious] {
            self.seed_if_empty(list).await?;
        }

        self.reload_snapshot().await
    }

    async fn seed_if_empty(&self, list: WordList) -> Result<(), ModerationError> {
        if self.store.count_words(list).await? > 0 {
            tracing::debug!(list = %list, "Word list already populated, skipping seed");
            return Ok(());
        }

        let mut seeded = 0usize;
        for word in default_words(list) {
            let text = word.word.clone();
            match self.store.insert_word(list, word).await {
                Ok(_) => seeded += 1,
                Err(e) => tracing::debug!(list = %list, word = %text, "Seed insert skipped: {}", e),
            }
        }

        tracing::info!(list = %list, seeded, "Seeded default words");
        Ok(())
    }

    /// Reload both lists from the store and swap in a fresh snapshot.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh_cache(&self) -> Result<(), ModerationError> {
        let _guard = self.admin_lock.lock().await;
        self.reload_snapshot().await
    }

    async fn reload_snapshot(&self) -> Result<(), ModerationError> {
        let banned = self.store.load_words(WordList::Banned).await.map_err(|e| {
            tracing::error!("Failed to load banned words, keeping cached lists: {}", e);
            e
        })?;
        let suspicious = self.store.load_words(WordList::Suspicious).await.map_err(|e| {
            tracing::error!("Failed to load suspicious words, keeping cached lists: {}", e);
            e
        })?;

        self.cache
            .replace(WordSnapshot::from_entries(&banned, &suspicious));

        tracing::info!(
            banned = banned.len(),
            suspicious = suspicious.len(),
            "Word cache refreshed"
        );
        Ok(())
    }

    /// The word lists currently used for checks.
    pub fn snapshot(&self) -> Arc<WordSnapshot> {
        self.cache.load()
    }

    /// Evaluate a listing against every rule.
    ///
    /// Runs purely in memory and always returns a verdict.
    pub fn check_content(&self, listing: &ListingDraft) -> ModerationVerdict {
        let words = self.cache.load();
        let verdict = self.rules.evaluate(listing, &words);

        if verdict.needs_review {
            tracing::debug!(
                category = %listing.category,
                price = listing.price,
                flags = ?verdict.flags,
                "Listing needs review"
            );
        }

        verdict
    }

    /// Add a single word. A duplicate is reported as a conflict.
    pub async fn add_word(
        &self,
        list: WordList,
        word: &str,
        category: &str,
        created_by: Option<u64>,
    ) -> Result<WordEntry, ModerationError> {
        let new_word = self.validate_word(list, word, category, created_by)?;

        let _guard = self.admin_lock.lock().await;
        let entry = self.store.insert_word(list, new_word).await?;
        tracing::info!(list = %list, id = entry.id, word = %entry.word, "Word added");

        self.reload_snapshot().await?;
        Ok(entry)
    }

    /// Add many words, skipping invalid entries and duplicates.
    ///
    /// Refreshes the cache once at the end and returns what was inserted.
    pub async fn add_words_bulk(
        &self,
        list: WordList,
        items: Vec<NewWord>,
        created_by: Option<u64>,
    ) -> Result<Vec<WordEntry>, ModerationError> {
        let _guard = self.admin_lock.lock().await;

        let mut seen = HashSet::new();
        let mut inserted = Vec::new();

        for item in items {
            let new_word = match self.validate_word(
                list,
                &item.word,
                &item.category,
                created_by.or(item.created_by),
            ) {
                Ok(w) => w,
                Err(e) => {
                    tracing::warn!(list = %list, word = %item.word, "Bulk add skipped: {}", e);
                    continue;
                }
            };

            if !seen.insert(new_word.word.clone()) {
                tracing::debug!(list = %list, word = %new_word.word, "Duplicate within batch");
                continue;
            }

            let text = new_word.word.clone();
            match self.store.insert_word(list, new_word).await {
                Ok(entry) => inserted.push(entry),
                Err(e) => tracing::warn!(list = %list, word = %text, "Bulk add skipped: {}", e),
            }
        }

        tracing::info!(list = %list, inserted = inserted.len(), "Bulk add finished");

        self.reload_snapshot().await?;
        Ok(inserted)
    }

    /// Remove a word by id.
    pub async fn remove_word(&self, list: WordList, id: i64) -> Result<(), ModerationError> {
        let _guard = self.admin_lock.lock().await;

        if !self.store.delete_word(list, id).await? {
            return Err(ModerationError::NotFound { list, id });
        }
        tracing::info!(list = %list, id, "Word removed");

        self.reload_snapshot().await
    }

    /// Words in a list, optionally of one category, ordered by category then word.
    pub async fn list_words(
        &self,
        list: WordList,
        category: Option<&str>,
    ) -> Result<Vec<WordEntry>, ModerationError> {
        let mut words = self.store.load_words(list).await?;

        if let Some(category) = category {
            words.retain(|w| w.category == category);
        }
        words.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.word.cmp(&b.word)));

        Ok(words)
    }

    /// Both category enumerations with display labels.
    pub fn categories(&self) -> CategoryCatalog {
        category_catalog()
    }

    fn validate_word(
        &self,
        list: WordList,
        word: &str,
        category: &str,
        created_by: Option<u64>,
    ) -> Result<NewWord, ModerationError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ModerationError::Validation("word must not be empty".to_string()));
        }

        let max = self.config().max_word_chars;
        if word.chars().count() > max {
            return Err(ModerationError::Validation(format!(
                "word is longer than {} characters",
                max
            )));
        }

        if !list.accepts_category(category) {
            return Err(ModerationError::Validation(format!(
                "unknown {} category '{}' (expected one of: {})",
                list,
                category,
                list.category_keys().join(", ")
            )));
        }

        Ok(NewWord {
            word: word.to_string(),
            category: category.to_string(),
            created_by,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::ReviewFlag;
    use chrono::Utc;
    use dashmap::DashMap;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

    /// In-memory store for testing, with switches to simulate outages
    struct MockWordStore {
        words: DashMap<WordList, Vec<WordEntry>>,
        next_id: AtomicI64,
        fail_loads: AtomicBool,
        fail_inserts: AtomicBool,
    }

    impl MockWordStore {
        fn new() -> Self {
            Self {
                words: DashMap::new(),
                next_id: AtomicI64::new(1),
                fail_loads: AtomicBool::new(false),
                fail_inserts: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl WordStore for MockWordStore {
        async fn load_words(&self, list: WordList) -> Result<Vec<WordEntry>, ModerationError> {
            if self.fail_loads.load(Ordering::SeqCst) {
                return Err(ModerationError::StoreUnavailable("connection refused".to_string()));
            }
            Ok(self.words.get(&list).map(|w| w.clone()).unwrap_or_default())
        }

        async fn insert_word(
            &self,
            list: WordList,
            word: NewWord,
        ) -> Result<WordEntry, ModerationError> {
            if self.fail_inserts.load(Ordering::SeqCst) {
                return Err(ModerationError::StoreUnavailable("read-only".to_string()));
            }
            let mut entries = self.words.entry(list).or_insert_with(Vec::new);
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
            let mut entries = self.words.entry(list).or_insert_with(Vec::new);
            let before = entries.len();
            entries.retain(|e| e.id != id);
            Ok(entries.len() != before)
        }

        async fn count_words(&self, list: WordList) -> Result<u64, ModerationError> {
            Ok(self.words.get(&list).map(|w| w.len() as u64).unwrap_or(0))
        }
    }

    async fn seeded_service() -> ModerationService<MockWordStore> {
        let service = ModerationService::new(MockWordStore::new(), ModerationConfig::default())
            .unwrap();
        service.initialize().await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_initialize_seeds_and_loads_cache() {
        let service = seeded_service().await;

        let snapshot = service.snapshot();
        assert_eq!(snapshot.banned.len(), default_words(WordList::Banned).len());
        assert_eq!(
            snapshot.suspicious.len(),
            default_words(WordList::Suspicious).len()
        );
        assert!(snapshot.banned.contains(&"대마".to_string()));
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let service = seeded_service().await;
        let before = service.store.count_words(WordList::Banned).await.unwrap();

        service.initialize().await.unwrap();

        let after = service.store.count_words(WordList::Banned).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_seed_failures_are_swallowed() {
        let store = MockWordStore::new();
        store.fail_inserts.store(true, Ordering::SeqCst);
        let service = ModerationService::new(store, ModerationConfig::default()).unwrap();

        service.initialize().await.unwrap();

        assert!(service.snapshot().banned.is_empty());
    }

    #[tokio::test]
    async fn test_urgent_sale_with_kakao_handle() {
        let service = seeded_service().await;

        let verdict = service.check_content(&ListingDraft::new(
            "급처 아이폰 팝니다",
            "카톡 abc123 로 연락주세요 미개봉 새제품 정품",
            500_000,
            "디지털/가전",
        ));

        assert!(verdict.needs_review);
        assert_eq!(
            verdict.flags,
            vec![ReviewFlag::SuspiciousWords, ReviewFlag::MessengerId]
        );
        assert_eq!(
            verdict.reasons[0],
            "contains multiple suspicious words: 급처, 카톡, 미개봉, 새제품, 정품"
        );
    }

    #[tokio::test]
    async fn test_ordinary_phone_listing_is_clean() {
        let service = seeded_service().await;

        let verdict = service.check_content(&ListingDraft::new(
            "아이폰 13",
            "깨끗하게 사용한 아이폰입니다 기능 이상없음",
            300_000,
            "디지털/가전",
        ));

        assert!(!verdict.needs_review);
        assert!(verdict.reasons.is_empty());
    }

    #[tokio::test]
    async fn test_banned_word_listing() {
        let service = seeded_service().await;

        let verdict = service.check_content(&ListingDraft::new(
            "대마 팝니다",
            "상태 좋은 물건 판매합니다",
            10_000,
            "기타",
        ));

        assert!(verdict.needs_review);
        assert_eq!(verdict.flags, vec![ReviewFlag::BannedWords]);
        assert_eq!(verdict.reasons[0], "contains banned words: 대마");
    }

    #[tokio::test]
    async fn test_check_is_deterministic() {
        let service = seeded_service().await;
        let listing = ListingDraft::new("급처 총기", "010-1234-5678 선입금 현금만", 10, "기타");

        let first = service.check_content(&listing);
        let second = service.check_content(&listing);

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let service = seeded_service().await;
        service.store.fail_loads.store(true, Ordering::SeqCst);

        let result = service.refresh_cache().await;
        assert!(matches!(result, Err(ModerationError::StoreUnavailable(_))));

        let verdict = service.check_content(&ListingDraft::new(
            "대마 팝니다",
            "상태 좋은 물건 판매합니다",
            10_000,
            "기타",
        ));
        assert!(verdict.has_flag(ReviewFlag::BannedWords));
    }

    #[tokio::test]
    async fn test_add_word_refreshes_cache() {
        let service = seeded_service().await;
        let listing = ListingDraft::new("Replica watch", "Looks exactly like the real one", 50_000, "잡화");
        assert!(!service.check_content(&listing).needs_review);

        let entry = service
            .add_word(WordList::Banned, "  Replica ", "ILLEGAL", Some(7))
            .await
            .unwrap();

        assert_eq!(entry.word, "Replica");
        assert_eq!(entry.created_by, Some(7));
        let verdict = service.check_content(&listing);
        assert_eq!(verdict.reasons, vec!["contains banned words: replica"]);
    }

    #[tokio::test]
    async fn test_add_duplicate_word_conflicts() {
        let service = seeded_service().await;

        let result = service.add_word(WordList::Banned, "대마", "ILLEGAL", None).await;

        assert!(matches!(result, Err(ModerationError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_add_word_validation() {
        let service = seeded_service().await;

        let empty = service.add_word(WordList::Banned, "   ", "ILLEGAL", None).await;
        assert!(matches!(empty, Err(ModerationError::Validation(_))));

        let long = "가".repeat(51);
        let too_long = service.add_word(WordList::Banned, &long, "ILLEGAL", None).await;
        assert!(matches!(too_long, Err(ModerationError::Validation(_))));

        // Suspicious categories are not valid for the banned list
        let wrong_list = service.add_word(WordList::Banned, "계좌", "PAYMENT", None).await;
        assert!(matches!(wrong_list, Err(ModerationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_word_surfaces_refresh_failure() {
        let service = seeded_service().await;
        service.store.fail_loads.store(true, Ordering::SeqCst);

        let result = service
            .add_word(WordList::Suspicious, "직거래만", "PAYMENT", None)
            .await;

        assert!(matches!(result, Err(ModerationError::StoreUnavailable(_))));
        assert!(!service.snapshot().suspicious.contains(&"직거래만".to_string()));
    }

    #[tokio::test]
    async fn test_bulk_add_skips_duplicates_and_invalid() {
        let service = seeded_service().await;

        let inserted = service
            .add_words_bulk(
                WordList::Suspicious,
                vec![
                    NewWord::new("택배거래만", "PAYMENT"),
                    NewWord::new("택배거래만", "PAYMENT"),
                    NewWord::new("급처", "URGENT_SALE"),
                    NewWord::new("직거래불가", "NOT_A_CATEGORY"),
                    NewWord::new("  ", "CLAIM"),
                    NewWord::new("한정판", "CLAIM"),
                ],
                Some(3),
            )
            .await
            .unwrap();

        let words: Vec<&str> = inserted.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["택배거래만", "한정판"]);
        assert!(inserted.iter().all(|e| e.created_by == Some(3)));

        let snapshot = service.snapshot();
        assert!(snapshot.suspicious.contains(&"한정판".to_string()));
        assert_eq!(
            snapshot.suspicious.len(),
            default_words(WordList::Suspicious).len() + 2
        );
    }

    #[tokio::test]
    async fn test_remove_word() {
        let service = seeded_service().await;
        let entry = service
            .add_word(WordList::Banned, "replica", "ILLEGAL", None)
            .await
            .unwrap();

        service.remove_word(WordList::Banned, entry.id).await.unwrap();
        assert!(!service.snapshot().banned.contains(&"replica".to_string()));

        let again = service.remove_word(WordList::Banned, entry.id).await;
        assert!(matches!(
            again,
            Err(ModerationError::NotFound { list: WordList::Banned, .. })
        ));
    }

    #[tokio::test]
    async fn test_list_words_ordering_and_filter() {
        let service = seeded_service().await;

        let all = service.list_words(WordList::Banned, None).await.unwrap();
        let keys: Vec<(&str, &str)> = all
            .iter()
            .map(|e| (e.category.as_str(), e.word.as_str()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        let weapons = service
            .list_words(WordList::Banned, Some("WEAPON"))
            .await
            .unwrap();
        assert!(!weapons.is_empty());
        assert!(weapons.iter().all(|e| e.category == "WEAPON"));
    }

    #[tokio::test]
    async fn test_categories_for_pickers() {
        let service = seeded_service().await;
        let catalog = service.categories();

        assert_eq!(catalog.banned.len(), 6);
        assert_eq!(catalog.suspicious.len(), 4);
    }
}
