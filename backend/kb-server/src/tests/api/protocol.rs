use crate::api::protocol::{
    Access, Guard, MissingState, require_board, require_column, require_task,
};
use crate::{AppState, TokenCookies};

use kb_auth::{ClaimsCodec, Identity};
use kb_config::{AuthConfig, LimitsConfig};
use kb_core::{BoardState, ColumnState, Role, TaskRef, WorkspaceState};

use std::cell::Cell;

use chrono::{Duration, Utc};
use googletest::prelude::*;
use http::StatusCode;
use sqlx::SqlitePool;
use uuid::Uuid;

const SECRET: &[u8] = b"protocol-test-secret-0123456789abcdef";

const ADMIN_GUARD: Guard = Guard::new(Access::Admin, MissingState::Forbidden);
const ANY_GUARD: Guard = Guard::new(Access::Any, MissingState::BadRequest);

fn app() -> AppState {
    // Never connected: these tests stop before storage.
    let pool = SqlitePool::connect_lazy("sqlite::memory:").unwrap();
    AppState::new(
        pool,
        ClaimsCodec::with_hs256(SECRET),
        &AuthConfig::default(),
        &LimitsConfig::default(),
    )
}

fn token<T: kb_auth::TokenPayload>(app: &AppState, payload: &T) -> String {
    app.codec
        .issue(payload, Utc::now() + Duration::hours(1))
        .unwrap()
}

fn cookies(identity: Option<String>, state: Option<String>) -> TokenCookies {
    TokenCookies { identity, state }
}

fn state_with_board(board_id: &str) -> WorkspaceState {
    let mut state = WorkspaceState::default();
    state.push_board(BoardState::new(board_id));
    state
}

#[tokio::test]
async fn given_no_identity_when_authorizing_then_401_and_lookup_not_called() {
    let app = app();
    let called = Cell::new(false);

    let result = ADMIN_GUARD.authorize(&app, &cookies(None, None), |_| {
        called.set(true);
        Ok(())
    });

    assert_that!(result.unwrap_err().status(), eq(StatusCode::UNAUTHORIZED));
    assert_that!(called.get(), eq(false));
}

#[tokio::test]
async fn given_forged_identity_when_authenticating_then_401() {
    let app = app();
    let other = ClaimsCodec::with_hs256(b"some-other-secret-0123456789abcdef");
    let identity = Identity::new("mallory", Role::Admin, Uuid::new_v4());
    let forged = other
        .issue(&identity, Utc::now() + Duration::hours(1))
        .unwrap();

    let result = Guard::authenticate(&app, &cookies(Some(forged), None));

    assert_that!(result.unwrap_err().status(), eq(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn given_member_on_admin_endpoint_when_authorizing_then_403_before_state_check() {
    let app = app();
    let identity = Identity::new("bob", Role::Member, Uuid::new_v4());

    let result = ADMIN_GUARD.authorize(&app, &cookies(Some(token(&app, &identity)), None), |_| {
        Ok(())
    });

    let error = result.unwrap_err();
    assert_that!(error.status(), eq(StatusCode::FORBIDDEN));
    assert!(error.to_string().contains("admin role"));
}

#[tokio::test]
async fn given_missing_state_when_authorizing_then_status_follows_guard() {
    let app = app();
    let identity = Identity::new("alice", Role::Admin, Uuid::new_v4());
    let cookies = cookies(Some(token(&app, &identity)), None);

    let forbidden = ADMIN_GUARD.authorize(&app, &cookies, |_| Ok(()));
    let bad_request = ANY_GUARD.authorize(&app, &cookies, |_| Ok(()));

    assert_that!(forbidden.unwrap_err().status(), eq(StatusCode::FORBIDDEN));
    assert_that!(bad_request.unwrap_err().status(), eq(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn given_garbled_state_when_authorizing_then_treated_as_missing() {
    let app = app();
    let identity = Identity::new("alice", Role::Admin, Uuid::new_v4());
    let cookies = cookies(Some(token(&app, &identity)), Some("a.b.c".into()));

    let result = ANY_GUARD.authorize(&app, &cookies, |_| Ok(()));

    assert_that!(result.unwrap_err().status(), eq(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn given_valid_tokens_when_authorizing_then_lookup_sees_decoded_state() {
    let app = app();
    let board_id = Uuid::new_v4().to_string();
    let identity = Identity::new("alice", Role::Admin, Uuid::new_v4());
    let cookies = cookies(
        Some(token(&app, &identity)),
        Some(token(&app, &state_with_board(&board_id))),
    );

    let authorized = ADMIN_GUARD
        .authorize(&app, &cookies, |state| require_board(state, &board_id))
        .unwrap();

    assert_eq!(authorized.identity, identity);
    assert_that!(authorized.state.boards.len(), eq(1));
}

#[test]
fn given_board_not_in_state_when_requiring_then_403() {
    let state = state_with_board("b2");

    let error = require_board(&state, "b1").unwrap_err();

    assert_that!(error.status(), eq(StatusCode::FORBIDDEN));
}

#[test]
fn given_board_with_fewer_columns_when_requiring_column_then_403() {
    let mut state = WorkspaceState::default();
    state.push_board(BoardState {
        id: "b1".to_string(),
        columns: vec![ColumnState::Count(1), ColumnState::Count(0)],
    });

    assert_eq!(
        require_column(&state, "b1", 1).unwrap(),
        &ColumnState::Count(0)
    );
    assert_that!(
        require_column(&state, "b1", 3).unwrap_err().status(),
        eq(StatusCode::FORBIDDEN)
    );
    assert_that!(
        require_column(&state, "b2", 0).unwrap_err().status(),
        eq(StatusCode::FORBIDDEN)
    );
}

#[test]
fn given_task_in_state_when_requiring_then_returns_its_board() {
    let mut state = state_with_board("b1");
    state.push_task("b1", 2, TaskRef::new("t1", 0));

    assert_eq!(require_task(&state, "t1").unwrap(), "b1");
    assert_that!(
        require_task(&state, "t2").unwrap_err().status(),
        eq(StatusCode::FORBIDDEN)
    );
}

#[tokio::test]
async fn given_failed_lookup_when_running_then_mutate_is_never_invoked() {
    let app = app();
    let identity = Identity::new("alice", Role::Admin, Uuid::new_v4());
    let cookies = cookies(
        Some(token(&app, &identity)),
        Some(token(&app, &state_with_board("b2"))),
    );
    let mutated = Cell::new(false);

    let result = ADMIN_GUARD
        .run(
            &app,
            &cookies,
            |state| require_board(state, "b1"),
            |_, _| {
                mutated.set(true);
                async { Ok(()) }
            },
            |_, _| {},
        )
        .await;

    assert_that!(result.unwrap_err().status(), eq(StatusCode::FORBIDDEN));
    assert_that!(mutated.get(), eq(false));
}

#[tokio::test]
async fn given_successful_mutation_when_running_then_updated_state_is_reissued() {
    let app = app();
    let identity = Identity::new("alice", Role::Admin, Uuid::new_v4());
    let cookies = cookies(
        Some(token(&app, &identity)),
        Some(token(&app, &state_with_board("b1"))),
    );

    let refreshed = ADMIN_GUARD
        .run(
            &app,
            &cookies,
            |state| require_board(state, "b1").map(|_| "b1".to_string()),
            |_, board| async move { Ok(board) },
            |state, board: &String| {
                state.remove_board(board);
            },
        )
        .await
        .unwrap();

    let cookie = refreshed.state_cookie.to_str().unwrap().to_string();
    let value = cookie
        .strip_prefix("state-token=")
        .and_then(|rest| rest.split(';').next())
        .unwrap();
    let verified = app.codec.verify::<WorkspaceState>(value).unwrap();
    assert_that!(verified.payload.boards.len(), eq(0));
}
