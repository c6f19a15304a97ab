//! The request pipeline shared by every endpoint that acts on boards or tasks.
//!
//! ```text
//! identity cookie --decode--> role check --> state cookie --decode-->
//!     lookup(state) --> mutate(storage) --> update(state) --> re-issue cookie
//! ```
//!
//! Authentication always precedes the role check, which always precedes the
//! membership lookup. A caller who fails an earlier step learns nothing about
//! the later ones.

use crate::api::cookies::{CookieOptions, IDENTITY_COOKIE, STATE_COOKIE, build_set_cookie};
use crate::api::extractors::token_cookies::TokenCookies;
use crate::app_state::AppState;
use crate::{ApiError, ApiResult};

use kb_auth::{Identity, TokenPayload};
use kb_core::{ColumnState, Role, WorkspaceState};

use std::future::Future;
use std::time::Duration;

use axum::http::HeaderValue;
use chrono::{DateTime, TimeDelta, Utc};

/// Role an endpoint demands after authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Any,
    Admin,
}

/// Status returned when the workspace-state token is absent or invalid.
///
/// Endpoints that target an already known resource answer `Forbidden` (no
/// proof of access). Endpoints that need the cache to check a body-supplied
/// ID answer `BadRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingState {
    BadRequest,
    Forbidden,
}

/// Caller that passed authentication, role and membership checks
#[derive(Debug)]
pub struct Authorized<L> {
    pub identity: Identity,
    pub state: WorkspaceState,
    pub target: L,
}

/// Result of a mutation together with the re-issued state cookie
#[derive(Debug)]
pub struct Refreshed<M> {
    pub value: M,
    pub state_cookie: HeaderValue,
}

#[derive(Debug, Clone, Copy)]
pub struct Guard {
    access: Access,
    missing_state: MissingState,
}

impl Guard {
    pub const fn new(access: Access, missing_state: MissingState) -> Self {
        Self {
            access,
            missing_state,
        }
    }

    /// Decode the identity cookie. Absent or invalid is 401.
    #[track_caller]
    pub fn authenticate(app: &AppState, cookies: &TokenCookies) -> ApiResult<Identity> {
        let token = cookies
            .identity
            .as_deref()
            .ok_or_else(|| ApiError::unauthenticated("Missing identity token"))?;

        let verified = app.codec.verify::<Identity>(token)?;
        Ok(verified.payload)
    }

    /// Authenticate, then enforce the endpoint's role.
    #[track_caller]
    pub fn identify(&self, app: &AppState, cookies: &TokenCookies) -> ApiResult<Identity> {
        let identity = Self::authenticate(app, cookies)?;

        if self.access == Access::Admin && identity.role != Role::Admin {
            return Err(ApiError::forbidden(format!(
                "{} requires the admin role",
                identity.subject
            )));
        }

        Ok(identity)
    }

    /// Steps up to and including the membership lookup. Nothing is mutated.
    #[track_caller]
    pub fn authorize<L, F>(
        &self,
        app: &AppState,
        cookies: &TokenCookies,
        lookup: F,
    ) -> ApiResult<Authorized<L>>
    where
        F: FnOnce(&WorkspaceState) -> ApiResult<L>,
    {
        let identity = self.identify(app, cookies)?;
        let state = self.decode_state(app, cookies)?;
        let target = lookup(&state)?;

        Ok(Authorized {
            identity,
            state,
            target,
        })
    }

    /// Full pipeline: authorize, mutate storage, apply the same change to the
    /// cached state and re-issue it.
    ///
    /// `mutate` is only invoked once every check has passed. Its errors are
    /// returned unchanged and no cookie is issued.
    pub async fn run<L, M, Lookup, Mutate, Fut, Update>(
        &self,
        app: &AppState,
        cookies: &TokenCookies,
        lookup: Lookup,
        mutate: Mutate,
        update: Update,
    ) -> ApiResult<Refreshed<M>>
    where
        Lookup: FnOnce(&WorkspaceState) -> ApiResult<L>,
        Mutate: FnOnce(Identity, L) -> Fut,
        Fut: Future<Output = ApiResult<M>>,
        Update: FnOnce(&mut WorkspaceState, &M),
    {
        let Authorized {
            identity,
            mut state,
            target,
        } = self.authorize(app, cookies, lookup)?;

        let subject = identity.subject.clone();
        let value = mutate(identity, target).await?;

        update(&mut state, &value);
        let state_cookie = state_cookie(app, &state)?;
        log::debug!("Re-issued workspace state for {subject}");

        Ok(Refreshed {
            value,
            state_cookie,
        })
    }

    #[track_caller]
    fn decode_state(&self, app: &AppState, cookies: &TokenCookies) -> ApiResult<WorkspaceState> {
        let rejected = |reason: &str| match self.missing_state {
            MissingState::BadRequest => ApiError::bad_request(reason),
            MissingState::Forbidden => ApiError::forbidden(reason),
        };

        let token = cookies
            .state
            .as_deref()
            .ok_or_else(|| rejected("Missing workspace state token"))?;

        match app.codec.verify::<WorkspaceState>(token) {
            Ok(verified) => Ok(verified.payload),
            Err(e) if e.is_client_error() => Err(rejected(&format!(
                "Invalid workspace state token ({})",
                e.code()
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

/// `Forbidden` unless the board is listed in the cached state.
#[track_caller]
pub fn require_board(state: &WorkspaceState, board_id: &str) -> ApiResult<()> {
    if state.contains_board(board_id) {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "Board {board_id} is not in your workspace"
        )))
    }
}

/// `Forbidden` unless the cached board has a column at `column`. A state
/// whose board carries fewer columns cannot record the mutation.
#[track_caller]
pub fn require_column<'a>(
    state: &'a WorkspaceState,
    board_id: &str,
    column: usize,
) -> ApiResult<&'a ColumnState> {
    require_board(state, board_id)?;
    state
        .board(board_id)
        .and_then(|board| board.columns.get(column))
        .ok_or_else(|| {
            ApiError::forbidden(format!(
                "Column {column} is not on board {board_id} in your workspace"
            ))
        })
}

/// `Forbidden` unless the task is listed in the cached state. Returns the
/// ID of the board holding it.
#[track_caller]
pub fn require_task(state: &WorkspaceState, task_id: &str) -> ApiResult<String> {
    state
        .board_of_task(task_id)
        .map(|board| board.id.clone())
        .ok_or_else(|| ApiError::forbidden(format!("Task {task_id} is not in your workspace")))
}

/// Now plus `ttl`
#[track_caller]
pub fn expiry(ttl: Duration) -> ApiResult<DateTime<Utc>> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .ok_or_else(|| ApiError::internal("Token lifetime out of range"))
}

fn issue_cookie<T: TokenPayload>(
    app: &AppState,
    name: &str,
    payload: &T,
    ttl: Duration,
) -> ApiResult<HeaderValue> {
    let token = app.codec.issue(payload, expiry(ttl)?)?;

    build_set_cookie(
        name,
        &token,
        &CookieOptions {
            max_age: ttl,
            secure: app.tokens.cookie_secure,
        },
    )
}

/// Sign `state` into a `Set-Cookie` value
pub fn state_cookie(app: &AppState, state: &WorkspaceState) -> ApiResult<HeaderValue> {
    issue_cookie(app, STATE_COOKIE, state, app.tokens.state_ttl)
}

/// Sign `identity` into a `Set-Cookie` value
pub fn identity_cookie(app: &AppState, identity: &Identity) -> ApiResult<HeaderValue> {
    issue_cookie(app, IDENTITY_COOKIE, identity, app.tokens.identity_ttl)
}
