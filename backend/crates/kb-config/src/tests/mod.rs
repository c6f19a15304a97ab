mod config;

use std::env;

use tempfile::TempDir;

pub(crate) const VALID_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and point KB_CONFIG_DIR at it
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("KB_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// A secret long enough to pass validation
pub(crate) fn with_valid_secret() -> EnvGuard {
    EnvGuard::set("KB_AUTH_TOKEN_SECRET", VALID_SECRET)
}
