use crate::error::{Result as ServerErrorResult, ServerError};

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use error_location::ErrorLocation;
use log::info;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

const MAX_CONNECTIONS: u32 = 10;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if needed) the SQLite database and bring its schema up to date.
pub async fn connect(path: &Path) -> ServerErrorResult<SqlitePool> {
    info!("Connecting to database: {}", path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .foreign_keys(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(BUSY_TIMEOUT),
        )
        .await
        .map_err(|source| ServerError::Database {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

    info!("Running database migrations...");
    kb_db::MIGRATOR
        .run(&pool)
        .await
        .map_err(|source| ServerError::Migration {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;
    info!("Migrations complete");

    Ok(pool)
}
