//! Axum extractor for the token cookies

use crate::api::cookies::{IDENTITY_COOKIE, STATE_COOKIE, find_cookie};

use std::convert::Infallible;
use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Raw identity and workspace-state tokens presented by the caller.
///
/// Extraction never fails: absence is a protocol decision made by
/// [`Guard`](crate::api::protocol::Guard), which must see the identity first.
#[derive(Debug, Clone, Default)]
pub struct TokenCookies {
    pub identity: Option<String>,
    pub state: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for TokenCookies {
    type Rejection = Infallible;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            Ok(TokenCookies {
                identity: find_cookie(&parts.headers, IDENTITY_COOKIE),
                state: find_cookie(&parts.headers, STATE_COOKIE),
            })
        }
    }
}
