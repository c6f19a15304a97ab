#![allow(dead_code)]

//! Test infrastructure for kb-server API tests

use kb_auth::{ClaimsCodec, Identity, TokenPayload};
use kb_config::{AuthConfig, LimitsConfig};
use kb_core::{Board, Role, Subtask, Task, Team, WorkspaceState};
use kb_db::{BoardRepository, TaskRepository, TeamRepository, WorkspaceRepository};
use kb_server::{AppState, build_router};

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode, header::SET_COOKIE},
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    kb_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing with the given board limit
pub async fn create_test_app_state_with_limit(max_boards_per_team: usize) -> AppState {
    let pool = create_test_pool().await;
    let limits = LimitsConfig {
        max_boards_per_team,
    };

    AppState::new(
        pool,
        ClaimsCodec::with_hs256(TEST_SECRET.as_bytes()),
        &AuthConfig::default(),
        &limits,
    )
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    create_test_app_state_with_limit(LimitsConfig::default().max_boards_per_team).await
}

pub async fn create_test_team(pool: &SqlitePool) -> Uuid {
    let team = Team::new();
    TeamRepository::new(pool.clone())
        .create(&team)
        .await
        .expect("Failed to create test team");
    team.id
}

pub async fn create_test_board(pool: &SqlitePool, team_id: Uuid, name: &str) -> Board {
    let board = Board::new(team_id, name.to_string());
    BoardRepository::new(pool.clone())
        .create(&board)
        .await
        .expect("Failed to create test board");
    board
}

pub async fn create_test_task(
    pool: &SqlitePool,
    team_id: Uuid,
    board_id: Uuid,
    column: usize,
    order: i64,
) -> Task {
    let task = Task::new(
        board_id,
        column,
        order,
        format!("Task {order}"),
        String::new(),
        vec![Subtask {
            title: "Step".to_string(),
            done: false,
        }],
    );
    TaskRepository::new(pool.clone())
        .create(team_id, &task)
        .await
        .expect("Failed to create test task");
    task
}

/// Sign any payload the way the server does
pub fn sign<T: TokenPayload>(state: &AppState, payload: &T) -> String {
    state
        .codec
        .issue(payload, Utc::now() + Duration::hours(1))
        .expect("Failed to sign token")
}

pub fn identity_token(state: &AppState, role: Role, team_id: Uuid) -> String {
    sign(state, &Identity::new("tester", role, team_id))
}

/// Signed state token mirroring what storage holds for the team
pub async fn stored_state_token(state: &AppState, team_id: Uuid) -> String {
    let workspace = WorkspaceRepository::new(state.pool.clone())
        .load_state(team_id)
        .await
        .expect("Failed to load state");
    sign(state, &workspace)
}

/// `Cookie` header value for the given tokens
pub fn cookie_header(identity: Option<&str>, workspace: Option<&str>) -> String {
    let mut pairs = Vec::new();
    if let Some(token) = identity {
        pairs.push(format!("auth-token={token}"));
    }
    if let Some(token) = workspace {
        pairs.push(format!("state-token={token}"));
    }
    pairs.join("; ")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: serde_json::Value,
}

impl TestResponse {
    /// Token set by a `Set-Cookie` header called `name`
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|value| {
                value
                    .split(';')
                    .next()
                    .and_then(|pair| pair.split_once('='))
                    .filter(|(key, _)| *key == name)
                    .map(|(_, token)| token.to_string())
            })
    }

    /// Decoded workspace state from the re-issued state cookie
    pub fn state(&self, app: &AppState) -> WorkspaceState {
        let token = self.cookie("state-token").expect("No state cookie set");
        app.codec
            .verify::<WorkspaceState>(&token)
            .expect("State cookie does not verify")
            .payload
    }
}

/// Send one request through a fresh router
pub async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    cookies: Option<String>,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookies) = cookies {
        builder = builder.header("cookie", cookies);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = build_router(state.clone()).oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    TestResponse {
        status,
        headers,
        json,
    }
}
