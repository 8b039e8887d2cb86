// SQLite-backed word store.
//
// Tables (identical layout):
// - banned_words: words whose presence alone flags a listing
// - suspicious_words: words that flag a listing when several co-occur

use crate::core::moderation::{ModerationError, NewWord, WordEntry, WordList, WordStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

fn table_name(list: WordList) -> &'static str {
    match list {
        WordList::Banned => "banned_words",
        WordList::Suspicious => "suspicious_words",
    }
}

fn store_error(e: sqlx::Error) -> ModerationError {
    ModerationError::StoreUnavailable(e.to_string())
}

pub struct SqliteWordStore {
    pool: Pool<Sqlite>,
}

impl SqliteWordStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) a database file or `sqlite::memory:` and migrate it.
    pub async fn open(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure the file exists if it's a file path
        let path_str = database_url.trim_start_matches("sqlite://");
        if !in_memory && !Path::new(path_str).exists() {
            if let Some(parent) = Path::new(path_str).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::File::create(path_str)?;
        }

        let conn_str = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite://{}", database_url)
        };

        let mut options = SqlitePoolOptions::new();
        if in_memory {
            // Every connection to :memory: is a separate database
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = options.connect(&conn_str).await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Run database migrations to create required tables.
    pub async fn migrate(&self) -> Result<(), ModerationError> {
        for list in [WordList::Banned, WordList::Suspicious] {
            let table = table_name(list);

            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    word TEXT NOT NULL UNIQUE,
                    category TEXT NOT NULL,
                    created_by INTEGER,
                    created_at TEXT NOT NULL
                );
                "#
            ))
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_category ON {table}(category, word);"
            ))
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        }

        Ok(())
    }
}

#[async_trait]
impl WordStore for SqliteWordStore {
    async fn load_words(&self, list: WordList) -> Result<Vec<WordEntry>, ModerationError> {
        let rows = sqlx::query(&format!(
            "SELECT id, word, category, created_by, created_at FROM {} ORDER BY id",
            table_name(list)
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let mut words = Vec::with_capacity(rows.len());
        for row in rows {
            let created_at_str: String = row.get("created_at");
            let created_at = DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now());

            words.push(WordEntry {
                id: row.get("id"),
                word: row.get("word"),
                category: row.get("category"),
                created_by: row.get::<Option<i64>, _>("created_by").map(|id| id as u64),
                created_at,
            });
        }
        Ok(words)
    }

    async fn insert_word(
        &self,
        list: WordList,
        word: NewWord,
    ) -> Result<WordEntry, ModerationError> {
        let created_at = Utc::now();

        let result = sqlx::query(&format!(
            "INSERT INTO {} (word, category, created_by, created_at) VALUES (?, ?, ?, ?)",
            table_name(list)
        ))
        .bind(&word.word)
        .bind(&word.category)
        .bind(word.created_by.map(|id| id as i64))
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(WordEntry {
                id: done.last_insert_rowid(),
                word: word.word,
                category: word.category,
                created_by: word.created_by,
                created_at,
            }),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(ModerationError::Conflict {
                    list,
                    word: word.word,
                })
            }
            Err(e) => Err(store_error(e)),
        }
    }

    async fn delete_word(&self, list: WordList, id: i64) -> Result<bool, ModerationError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", table_name(list)))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_words(&self, list: WordList) -> Result<u64, ModerationError> {
        let row = sqlx::query(&format!(
            "SELECT COUNT(*) AS count FROM {}",
            table_name(list)
        ))
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.get::<i64, _>("count") as u64)
    }
}
