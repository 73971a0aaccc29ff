use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Embedded schema migrations, applied at startup and by tests.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Creates and returns a SQLite connection pool.
///
/// For a `sqlite://path` URL the parent directory is created when missing,
/// so the default file-backed store works on a fresh checkout.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite store at {database_url}");

    if let Some(path) = database_url.strip_prefix("sqlite://") {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!("SQLite connection pool established");
    Ok(pool)
}
