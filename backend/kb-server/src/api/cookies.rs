//! Reading token cookies from requests and building `Set-Cookie` values.

use crate::{ApiError, ApiResult};

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};

/// Cookie carrying the identity token
pub const IDENTITY_COOKIE: &str = "auth-token";

/// Cookie carrying the workspace-state token
pub const STATE_COOKIE: &str = "state-token";

/// Attributes shared by every cookie we issue
#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub max_age: Duration,
    pub secure: bool,
}

/// Value of the first cookie called `name` across all `Cookie` headers.
/// An empty value counts as absent.
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `name=value; HttpOnly; SameSite=Strict; Path=/; Max-Age=n[; Secure]`
#[track_caller]
pub fn build_set_cookie(name: &str, value: &str, options: &CookieOptions) -> ApiResult<HeaderValue> {
    let mut cookie = format!(
        "{name}={value}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        options.max_age.as_secs()
    );
    if options.secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::internal(format!("Cannot build {name} cookie: {e}")))
}
