//! Board REST API handlers

use crate::api::extractors::token_cookies::TokenCookies;
use crate::api::protocol::{Access, Guard, MissingState, require_board, state_cookie};
use crate::app_state::AppState;
use crate::{
    ApiError, ApiResult, BoardDto, BoardListResponse, BoardRequest, BoardResponse,
    BoardTasksResponse, DeleteResponse, IdQuery, TaskDto,
};

use kb_core::{
    Board, BoardNameValidator, BoardState, COLUMN_COUNT, StringValidator, UuidValidator,
};
use kb_db::{BoardRepository, TaskRepository, WorkspaceRepository};

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

const CREATE_GUARD: Guard = Guard::new(Access::Admin, MissingState::BadRequest);
const CHANGE_GUARD: Guard = Guard::new(Access::Admin, MissingState::Forbidden);
const READ_GUARD: Guard = Guard::new(Access::Any, MissingState::Forbidden);

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/boards
///
/// Boards of the caller's team, read from storage. The state cookie is
/// re-issued from the same read so the cache starts out authoritative.
pub async fn list_boards(
    State(app): State<AppState>,
    cookies: TokenCookies,
) -> ApiResult<Response> {
    let identity = Guard::authenticate(&app, &cookies)?;
    let team_id = identity.tenant_id;

    let state = WorkspaceRepository::new(app.pool.clone())
        .load_state(team_id)
        .await?;
    let boards = BoardRepository::new(app.pool.clone())
        .list_by_team(team_id)
        .await?;

    let boards = boards
        .into_iter()
        .map(|board| {
            let counts = BoardDto::task_counts(state.board(&board.id.to_string()));
            BoardDto::new(board, counts)
        })
        .collect();

    let cookie = state_cookie(&app, &state)?;
    Ok(([(SET_COOKIE, cookie)], Json(BoardListResponse { boards })).into_response())
}

/// POST /api/v1/boards
pub async fn create_board(
    State(app): State<AppState>,
    cookies: TokenCookies,
    body: Result<Json<BoardRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let limit = app.max_boards_per_team;
    let pool = app.pool.clone();

    let refreshed = CREATE_GUARD
        .run(
            &app,
            &cookies,
            |state| {
                let Json(request) = body?;
                BoardNameValidator.validate(&request.name)?;
                if state.boards.len() >= limit {
                    return Err(board_limit_reached(limit));
                }
                Ok(request.name.trim().to_string())
            },
            move |identity, name| async move {
                let boards = BoardRepository::new(pool);
                // The cache may be stale; storage has the final count.
                if boards.count_by_team(identity.tenant_id).await? >= limit {
                    return Err(board_limit_reached(limit));
                }

                let board = Board::new(identity.tenant_id, name);
                boards.create(&board).await?;
                log::info!("{} created board {}", identity.subject, board.id);
                Ok::<_, ApiError>(board)
            },
            |state, board| state.push_board(BoardState::new(board.id.to_string())),
        )
        .await?;

    let board = BoardDto::new(refreshed.value, vec![0; COLUMN_COUNT]);
    Ok((
        [(SET_COOKIE, refreshed.state_cookie)],
        Json(BoardResponse { board }),
    )
        .into_response())
}

/// PATCH /api/v1/boards?id=
pub async fn rename_board(
    State(app): State<AppState>,
    cookies: TokenCookies,
    query: Result<Query<IdQuery>, QueryRejection>,
    body: Result<Json<BoardRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let pool = app.pool.clone();

    let refreshed = CHANGE_GUARD
        .run(
            &app,
            &cookies,
            |state| {
                let board_id = board_id_from_query(query)?;
                require_board(state, &board_id.to_string())?;

                let Json(request) = body?;
                BoardNameValidator.validate(&request.name)?;

                let counts = BoardDto::task_counts(state.board(&board_id.to_string()));
                Ok((board_id, request.name.trim().to_string(), counts))
            },
            move |identity, (board_id, name, counts)| async move {
                let boards = BoardRepository::new(pool);
                boards.rename(identity.tenant_id, board_id, &name).await?;

                let board = boards
                    .find_by_id(identity.tenant_id, board_id)
                    .await?
                    .ok_or_else(|| ApiError::not_found(format!("board {board_id} not found")))?;
                Ok::<_, ApiError>(BoardDto::new(board, counts))
            },
            |_, _| {},
        )
        .await?;

    Ok((
        [(SET_COOKIE, refreshed.state_cookie)],
        Json(BoardResponse {
            board: refreshed.value,
        }),
    )
        .into_response())
}

/// DELETE /api/v1/boards?id=
///
/// Deletes the board and every task on it.
pub async fn delete_board(
    State(app): State<AppState>,
    cookies: TokenCookies,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let pool = app.pool.clone();

    let refreshed = CHANGE_GUARD
        .run(
            &app,
            &cookies,
            |state| {
                let board_id = board_id_from_query(query)?;
                require_board(state, &board_id.to_string())?;
                Ok(board_id)
            },
            move |identity, board_id| async move {
                BoardRepository::new(pool)
                    .delete(identity.tenant_id, board_id)
                    .await?;
                log::info!("{} deleted board {}", identity.subject, board_id);
                Ok::<_, ApiError>(board_id)
            },
            |state, board_id| {
                state.remove_board(&board_id.to_string());
            },
        )
        .await?;

    Ok((
        [(SET_COOKIE, refreshed.state_cookie)],
        Json(DeleteResponse {
            deleted_id: refreshed.value.to_string(),
        }),
    )
        .into_response())
}

/// GET /api/v1/boards/{id}/tasks
///
/// Read only: the state cookie is checked but not re-issued.
pub async fn list_board_tasks(
    State(app): State<AppState>,
    cookies: TokenCookies,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<BoardTasksResponse>> {
    let authorized = READ_GUARD.authorize(&app, &cookies, |state| {
        let Path(id) = path?;
        UuidValidator::new("id").validate(&id)?;
        let board_id = Uuid::parse_str(&id)?;
        require_board(state, &board_id.to_string())?;
        Ok(board_id)
    })?;

    let team_id = authorized.identity.tenant_id;
    let board_id = authorized.target;

    BoardRepository::new(app.pool.clone())
        .find_by_id(team_id, board_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("board {board_id} not found")))?;

    let tasks = TaskRepository::new(app.pool.clone())
        .find_by_board(team_id, board_id)
        .await?;

    let mut columns: Vec<Vec<TaskDto>> = (0..COLUMN_COUNT).map(|_| Vec::new()).collect();
    for task in tasks {
        if let Some(column) = columns.get_mut(task.column) {
            column.push(TaskDto::from(task));
        }
    }

    Ok(Json(BoardTasksResponse {
        board_id: board_id.to_string(),
        columns,
    }))
}

// =============================================================================
// Helpers
// =============================================================================

#[track_caller]
fn board_id_from_query(query: Result<Query<IdQuery>, QueryRejection>) -> ApiResult<Uuid> {
    let Query(query) = query?;
    UuidValidator::new("id").validate(&query.id)?;
    Ok(Uuid::parse_str(&query.id)?)
}

#[track_caller]
fn board_limit_reached(limit: usize) -> ApiError {
    ApiError::bad_request(format!("A team can have at most {limit} boards"))
}
