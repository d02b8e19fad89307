/**
 * Server Configuration
 *
 * Environment-driven configuration. Unlike optional services, the
 * database is required: the message store is the durable core of this
 * service, so startup fails without a usable `DATABASE_URL`.
 */

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Connect the database pool and bring the schema up to date
///
/// Reads `DATABASE_URL` (defaulting to a local file database for
/// development) and runs pending migrations before returning.
pub async fn load_database() -> Result<SqlitePool, Box<dyn std::error::Error + Send + Sync>> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://teamline.db?mode=rwc".to_string());

    tracing::info!("Connecting to database...");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}

/// Apply the embedded migrations to a pool
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
