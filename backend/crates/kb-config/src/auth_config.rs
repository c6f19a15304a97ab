use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_COOKIE_SECURE, DEFAULT_IDENTITY_TTL_SECS,
    DEFAULT_INVITE_TTL_SECS, DEFAULT_STATE_TTL_SECS, MIN_TOKEN_SECRET_LENGTH,
};

use std::time::Duration;

use serde::Deserialize;

/// Token signing and lifetime settings.
///
/// `token_secret` is the single symmetric key for every token kind. It is
/// read once at startup and handed to the codec.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub token_secret: Option<String>,
    pub identity_ttl_secs: u64,
    pub state_ttl_secs: u64,
    pub invite_ttl_secs: u64,
    /// Add `Secure` to issued cookies
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            identity_ttl_secs: DEFAULT_IDENTITY_TTL_SECS,
            state_ttl_secs: DEFAULT_STATE_TTL_SECS,
            invite_ttl_secs: DEFAULT_INVITE_TTL_SECS,
            cookie_secure: DEFAULT_COOKIE_SECURE,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let secret = self
            .token_secret
            .as_deref()
            .ok_or_else(|| ConfigError::auth("auth.token_secret is required"))?;

        if secret.len() < MIN_TOKEN_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.token_secret must be at least {MIN_TOKEN_SECRET_LENGTH} characters"
            )));
        }

        for (name, value) in [
            ("identity_ttl_secs", self.identity_ttl_secs),
            ("state_ttl_secs", self.state_ttl_secs),
            ("invite_ttl_secs", self.invite_ttl_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::auth(format!("auth.{name} must be > 0")));
            }
        }

        Ok(())
    }

    pub fn identity_ttl(&self) -> Duration {
        Duration::from_secs(self.identity_ttl_secs)
    }

    pub fn state_ttl(&self) -> Duration {
        Duration::from_secs(self.state_ttl_secs)
    }

    pub fn invite_ttl(&self) -> Duration {
        Duration::from_secs(self.invite_ttl_secs)
    }
}
