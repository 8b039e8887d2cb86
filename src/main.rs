// Entry point for the listing moderation engine.
//
// This file's job is to:
// 1. Load configuration
// 2. Open the word store and seed defaults (dependency injection)
// 3. Evaluate listing drafts read as JSON lines on stdin, writing one
//    verdict per line to stdout

use listing_guard::{
    ListingDraft, ListingStatus, ModerationConfig, ModerationService, ModerationVerdict,
    SqliteWordStore,
};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const DEFAULT_DB_PATH: &str = "data/moderation.db";

/// One output line: the verdict plus the state the listing should enter.
#[derive(Serialize)]
struct VerdictLine<'a> {
    status: ListingStatus,
    #[serde(flatten)]
    verdict: &'a ModerationVerdict,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only verdicts
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let db_path = std::env::var("MODERATION_DB_PATH").unwrap_or_else(|_| {
        tracing::info!("MODERATION_DB_PATH not set, using default: {}", DEFAULT_DB_PATH);
        DEFAULT_DB_PATH.to_string()
    });
    let config = ModerationConfig::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let store = SqliteWordStore::open(&db_path).await?;
    let moderation = ModerationService::new(store, config)?;
    moderation.initialize().await?;

    tracing::info!(db = %db_path, "Moderation engine ready, reading listings from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let draft: ListingDraft = match serde_json::from_str(&line) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("Skipping malformed listing: {}", e);
                continue;
            }
        };

        let verdict = moderation.check_content(&draft);
        let output = serde_json::to_string(&VerdictLine {
            status: verdict.listing_status(),
            verdict: &verdict,
        })?;

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}
