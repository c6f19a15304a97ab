use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    kb_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
