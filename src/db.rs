use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Configure SQLite pragmas for optimal performance.
/// These are set per-connection via the after_connect callback.
async fn configure_sqlite_pragmas(conn: &mut sqlx::SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Executor;

    // WAL mode: allows concurrent reads during writes
    conn.execute("PRAGMA journal_mode = WAL").await?;

    // NORMAL synchronous: faster writes, data still synced at critical moments
    conn.execute("PRAGMA synchronous = NORMAL").await?;

    // 5 second timeout for busy connections (prevents "database locked" errors)
    conn.execute("PRAGMA busy_timeout = 5000").await?;

    conn.execute("PRAGMA foreign_keys = ON").await?;

    Ok(())
}

/// Connect to the report database and run pending migrations.
pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    log::info!("[DB] Connecting to {}", database_url);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _meta| Box::pin(async move { configure_sqlite_pragmas(conn).await }))
        .connect(database_url)
        .await
        .with_context(|| format!("failed to connect to database: {}", database_url))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    Ok(pool)
}
