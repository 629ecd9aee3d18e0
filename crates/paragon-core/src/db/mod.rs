//! SQLite persistence with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `collection` - Tag collection document and habit branches
//! - `names` - Name suggestion counters

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod collection;
mod names;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the database at `path` and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a unique temporary file rather than `:memory:` so every pooled
    /// connection sees the same data.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "paragon_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;

            -- The whole tag collection as one JSON document
            CREATE TABLE IF NOT EXISTS tag_collection (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                document TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Learned product habits, one row per branch key
            CREATE TABLE IF NOT EXISTS habit_branches (
                id INTEGER PRIMARY KEY,
                branch_key TEXT NOT NULL UNIQUE,
                products TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Name autocomplete counters
            CREATE TABLE IF NOT EXISTS name_suggestions (
                name TEXT PRIMARY KEY,
                count INTEGER NOT NULL CHECK (count > 0)
            );

            CREATE INDEX IF NOT EXISTS idx_name_suggestions_count
                ON name_suggestions(count DESC, name);
            "#,
        )?;

        info!("Database schema initialized at {}", self.db_path);
        Ok(())
    }

    /// Table row counts, for status output
    pub fn stats(&self) -> Result<DbStats> {
        let conn = self.conn()?;
        let count = |table: &str| -> Result<i64> {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?)
        };

        Ok(DbStats {
            has_collection: count("tag_collection")? > 0,
            habit_branches: count("habit_branches")?,
            name_suggestions: count("name_suggestions")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DbStats {
    pub has_collection: bool,
    pub habit_branches: i64,
    pub name_suggestions: i64,
}
