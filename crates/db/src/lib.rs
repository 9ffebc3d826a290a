//! SQLite connection pool and migration tooling for biblio.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Shared database handle passed into modules and handlers.
///
/// Cloning is cheap; every clone shares the same pool. Connections are
/// checked out per query and returned on all exit paths.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open a pool against `url`, creating the database file if missing.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url '{url}'"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database pool for '{url}'"))?;

        tracing::info!(url, max_connections, "database pool ready");

        Ok(Self { pool })
    }

    /// The underlying pool, for query execution.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply one module migration, at most once per `(module, id)` pair.
    ///
    /// Applied ids are recorded in a `_migrations` table so reboots skip
    /// already-run scripts. The script runs inside a transaction together
    /// with its bookkeeping row.
    pub async fn apply_migration(&self, module: &str, id: &str, sql: &str) -> anyhow::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS _migrations (
                module TEXT NOT NULL,
                id TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (module, id)
            )",
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure _migrations table")?;

        let applied = sqlx::query("SELECT 1 FROM _migrations WHERE module = ? AND id = ?")
            .bind(module)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if applied.is_some() {
            tracing::debug!(module, id, "migration already applied");
            return Ok(());
        }

        tracing::info!(module, id, "applying migration");

        let mut tx = self.pool.begin().await?;
        sqlx::raw_sql(sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("migration '{id}' from module '{module}' failed"))?;
        sqlx::query("INSERT INTO _migrations (module, id) VALUES (?, ?)")
            .bind(module)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    async fn memory_db() -> Db {
        // A single connection keeps every query on the same in-memory database.
        Db::connect("sqlite::memory:", 1).await.unwrap()
    }

    #[tokio::test]
    async fn migration_creates_schema() {
        let db = memory_db().await;
        db.apply_migration("shelf", "001_init", "CREATE TABLE shelf (id INTEGER PRIMARY KEY);")
            .await
            .unwrap();

        sqlx::query("INSERT INTO shelf (id) VALUES (1)")
            .execute(db.pool())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn migration_is_applied_once() {
        let db = memory_db().await;
        let ddl = "CREATE TABLE shelf (id INTEGER PRIMARY KEY);";

        db.apply_migration("shelf", "001_init", ddl).await.unwrap();
        // A second run must not re-execute the script (the table already exists).
        db.apply_migration("shelf", "001_init", ddl).await.unwrap();

        let row = sqlx::query("SELECT COUNT(*) AS n FROM _migrations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let count: i64 = row.get("n");
        assert_eq!(count, 1);
    }
}
