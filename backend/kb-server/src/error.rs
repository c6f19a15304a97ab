use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] kb_config::ConfigError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to open database {path}: {source} {location}")]
    Database {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration failed: {source} {location}")]
    Migration {
        #[source]
        source: sqlx::migrate::MigrateError,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, ServerError>;
