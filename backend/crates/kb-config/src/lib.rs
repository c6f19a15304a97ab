mod auth_config;
mod config;
mod database_config;
mod error;
mod limits_config;
mod log_level;
mod logging_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult, ConfigSection};
pub use limits_config::LimitsConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

// Directories
const CONFIG_DIR_ENV: &str = "KB_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".kb";
const CONFIG_FILENAME: &str = "config.toml";

// Server
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

// Database
const DEFAULT_DATABASE_FILENAME: &str = "kanban.db";

// Auth
const MIN_TOKEN_SECRET_LENGTH: usize = 32;
const DEFAULT_IDENTITY_TTL_SECS: u64 = 86_400;
const DEFAULT_STATE_TTL_SECS: u64 = 86_400;
const DEFAULT_INVITE_TTL_SECS: u64 = 3_600;
const DEFAULT_COOKIE_SECURE: bool = false;

// Limits
const DEFAULT_MAX_BOARDS_PER_TEAM: usize = 3;
const MIN_MAX_BOARDS_PER_TEAM: usize = 1;
const MAX_MAX_BOARDS_PER_TEAM: usize = 100;

// Logging
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
const DEFAULT_LOG_DIRECTORY: &str = "log";
