use kb_auth::ClaimsCodec;
use kb_config::{AuthConfig, LimitsConfig};

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

/// Lifetimes and cookie flags for issued tokens
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub identity_ttl: Duration,
    pub state_ttl: Duration,
    pub invite_ttl: Duration,
    pub cookie_secure: bool,
}

impl From<&AuthConfig> for TokenSettings {
    fn from(config: &AuthConfig) -> Self {
        Self {
            identity_ttl: config.identity_ttl(),
            state_ttl: config.state_ttl(),
            invite_ttl: config.invite_ttl(),
            cookie_secure: config.cookie_secure,
        }
    }
}

/// Shared, read-only request context. Cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub codec: Arc<ClaimsCodec>,
    pub tokens: TokenSettings,
    pub max_boards_per_team: usize,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        codec: ClaimsCodec,
        auth: &AuthConfig,
        limits: &LimitsConfig,
    ) -> Self {
        Self {
            pool,
            codec: Arc::new(codec),
            tokens: TokenSettings::from(auth),
            max_boards_per_team: limits.max_boards_per_team,
        }
    }
}
