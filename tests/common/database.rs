//! Database test fixtures.
//!
//! Each test gets its own temporary SQLite database with migrations
//! applied, so tests are isolated and need no external services.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::NamedTempFile;

/// Test database fixture
///
/// Holds the backing temp file so it outlives every pool connection.
pub struct TestDatabase {
    pool: SqlitePool,
    _file: NamedTempFile,
}

impl TestDatabase {
    /// Create a new test database with the schema applied
    pub async fn new() -> Self {
        let file = NamedTempFile::new().expect("Failed to create temp database file");
        let url = format!("sqlite://{}?mode=rwc", file.path().display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .expect("Failed to create test database pool");

        teamline::server::config::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, _file: file }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
