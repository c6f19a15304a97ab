use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, DatabaseConfig, LimitsConfig, LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for KB_CONFIG_DIR env var, else use ./.kb/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply KB_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)
                .map_err(|e| ConfigError::io(&config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        toml::from_str(&contents).map_err(|e| ConfigError::toml(path, e))
    }

    /// Get the config directory.
    /// Priority: KB_CONFIG_DIR env var > ./.kb/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::directory("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.limits.validate()?;

        let db_path = Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        if let Some(file) = &self.logging.file
            && (file.contains('/') || file.contains('\\'))
        {
            return Err(ConfigError::logging(
                "logging.file must be a file name; use logging.dir for the directory",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Get log file path, if logging to a file.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);
        info!(
            "  auth: secret {}, ttl identity={}s state={}s invite={}s, secure cookies: {}",
            if self.auth.token_secret.is_some() {
                "set"
            } else {
                "missing"
            },
            self.auth.identity_ttl_secs,
            self.auth.state_ttl_secs,
            self.auth.invite_ttl_secs,
            self.auth.cookie_secure
        );
        info!(
            "  limits: max_boards_per_team={}",
            self.limits.max_boards_per_team
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("KB_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("KB_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("KB_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("KB_AUTH_TOKEN_SECRET", &mut self.auth.token_secret);
        Self::apply_env_parse(
            "KB_AUTH_IDENTITY_TTL_SECS",
            &mut self.auth.identity_ttl_secs,
        );
        Self::apply_env_parse("KB_AUTH_STATE_TTL_SECS", &mut self.auth.state_ttl_secs);
        Self::apply_env_parse("KB_AUTH_INVITE_TTL_SECS", &mut self.auth.invite_ttl_secs);
        Self::apply_env_bool("KB_AUTH_COOKIE_SECURE", &mut self.auth.cookie_secure);

        // Limits
        Self::apply_env_parse(
            "KB_LIMITS_MAX_BOARDS_PER_TEAM",
            &mut self.limits.max_boards_per_team,
        );

        // Logging
        Self::apply_env_parse("KB_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("KB_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("KB_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
