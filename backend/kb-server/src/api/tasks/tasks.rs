//! Task REST API handlers

use crate::api::extractors::token_cookies::TokenCookies;
use crate::api::protocol::{Access, Guard, MissingState, require_column, require_task};
use crate::app_state::AppState;
use crate::{
    ApiError, ApiResult, CreateTaskRequest, DeleteResponse, IdQuery, OptionalIdQuery,
    ReorderResponse, ReorderTasksRequest, TaskDto, TaskResponse, UpdateTaskRequest,
};

use kb_core::{
    ColumnIndexValidator, DescriptionValidator, IntValidator, OrderValidator,
    StringValidator, Subtask, SubtaskTitleValidator, Task, TaskPatch, TaskRef,
    TaskTitleValidator, UuidValidator,
};
use kb_db::TaskRepository;

use std::collections::HashSet;

use axum::{
    Json,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

const CREATE_GUARD: Guard = Guard::new(Access::Admin, MissingState::BadRequest);
const UPDATE_GUARD: Guard = Guard::new(Access::Admin, MissingState::BadRequest);
const DELETE_GUARD: Guard = Guard::new(Access::Admin, MissingState::Forbidden);
const REORDER_GUARD: Guard = Guard::new(Access::Any, MissingState::BadRequest);

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/v1/tasks
///
/// Appends the task to the end of its column.
pub async fn create_task(
    State(app): State<AppState>,
    cookies: TokenCookies,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let pool = app.pool.clone();

    let refreshed = CREATE_GUARD
        .run(
            &app,
            &cookies,
            |state| {
                let Json(request) = body?;
                let board_id = parse_uuid("board_id", &request.board_id)?;
                ColumnIndexValidator.validate(request.column)?;
                validate_content(&request.title, &request.description, &request.subtasks)?;

                let column = request.column as usize;
                let order = require_column(state, &board_id.to_string(), column)?.next_order();

                Ok(Task::new(
                    board_id,
                    column,
                    order,
                    request.title.trim().to_string(),
                    request.description,
                    request.subtasks,
                ))
            },
            move |identity, task| async move {
                TaskRepository::new(pool)
                    .create(identity.tenant_id, &task)
                    .await?;
                log::info!("{} created task {}", identity.subject, task.id);
                Ok::<_, ApiError>(task)
            },
            |state, task| {
                state.push_task(
                    &task.board_id.to_string(),
                    task.column,
                    TaskRef::new(task.id.to_string(), task.order),
                );
            },
        )
        .await?;

    Ok((
        [(SET_COOKIE, refreshed.state_cookie)],
        Json(TaskResponse {
            task: TaskDto::from(refreshed.value),
        }),
    )
        .into_response())
}

/// PATCH /api/v1/tasks?id= edits one task, PATCH /api/v1/tasks (no id)
/// moves several.
pub async fn patch_tasks(
    State(app): State<AppState>,
    cookies: TokenCookies,
    query: Result<Query<OptionalIdQuery>, QueryRejection>,
    body: Bytes,
) -> ApiResult<Response> {
    // Query rejections must not outrank a missing identity.
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            Guard::authenticate(&app, &cookies)?;
            return Err(rejection.into());
        }
    };

    match query.id {
        Some(id) => update_task(app, cookies, id, parse_body(&body)).await,
        None => reorder_tasks(app, cookies, parse_body(&body)).await,
    }
}

/// DELETE /api/v1/tasks?id=
pub async fn delete_task(
    State(app): State<AppState>,
    cookies: TokenCookies,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let pool = app.pool.clone();

    let refreshed = DELETE_GUARD
        .run(
            &app,
            &cookies,
            |state| {
                let Query(query) = query?;
                let task_id = parse_uuid("id", &query.id)?;
                require_task(state, &task_id.to_string())?;
                Ok(task_id)
            },
            move |identity, task_id| async move {
                TaskRepository::new(pool)
                    .delete(identity.tenant_id, task_id)
                    .await?;
                log::info!("{} deleted task {}", identity.subject, task_id);
                Ok::<_, ApiError>(task_id)
            },
            |state, task_id| {
                state.remove_task(&task_id.to_string());
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

// =============================================================================
// PATCH variants
// =============================================================================

async fn update_task(
    app: AppState,
    cookies: TokenCookies,
    id: String,
    body: ApiResult<UpdateTaskRequest>,
) -> ApiResult<Response> {
    let pool = app.pool.clone();

    let refreshed = UPDATE_GUARD
        .run(
            &app,
            &cookies,
            |state| {
                let task_id = parse_uuid("id", &id)?;
                require_task(state, &task_id.to_string())?;

                let request = body?;
                validate_content(&request.title, &request.description, &request.subtasks)?;

                let patch = TaskPatch {
                    title: request.title.trim().to_string(),
                    description: request.description,
                    subtasks: request.subtasks,
                };
                Ok((task_id, patch))
            },
            move |identity, (task_id, patch)| async move {
                let tasks = TaskRepository::new(pool);
                tasks.update(identity.tenant_id, task_id, &patch).await?;

                let task = tasks
                    .find_by_id(identity.tenant_id, task_id)
                    .await?
                    .ok_or_else(|| ApiError::not_found(format!("task {task_id} not found")))?;
                Ok::<_, ApiError>(task)
            },
            |_, _| {},
        )
        .await?;

    Ok((
        [(SET_COOKIE, refreshed.state_cookie)],
        Json(TaskResponse {
            task: TaskDto::from(refreshed.value),
        }),
    )
        .into_response())
}

/// Target of a bulk move after validation
struct Reorder {
    board_id: Uuid,
    column: usize,
    tasks: Vec<TaskRef>,
    positions: Vec<(Uuid, i64)>,
}

async fn reorder_tasks(
    app: AppState,
    cookies: TokenCookies,
    body: ApiResult<ReorderTasksRequest>,
) -> ApiResult<Response> {
    let pool = app.pool.clone();

    let refreshed = REORDER_GUARD
        .run(
            &app,
            &cookies,
            |state| {
                let request = body?;
                let board_id = parse_uuid("board_id", &request.board_id)?;
                ColumnIndexValidator.validate(request.column)?;
                if request.tasks.is_empty() {
                    return Err(ApiError::bad_request("tasks cannot be empty"));
                }

                let mut seen = HashSet::new();
                let mut positions = Vec::with_capacity(request.tasks.len());
                for entry in &request.tasks {
                    let task_id = parse_uuid("tasks", &entry.id)?;
                    OrderValidator.validate(entry.order)?;
                    if !seen.insert(task_id) {
                        return Err(ApiError::bad_request(format!(
                            "task {task_id} is listed more than once"
                        )));
                    }
                    positions.push((task_id, entry.order));
                }

                let board_key = board_id.to_string();
                let column = request.column as usize;
                require_column(state, &board_key, column)?;
                let board = state.board(&board_key);
                for (task_id, _) in &positions {
                    if !board.is_some_and(|b| b.contains_task(&task_id.to_string())) {
                        return Err(ApiError::forbidden(format!(
                            "Task {task_id} is not on board {board_key}"
                        )));
                    }
                }

                let tasks = positions
                    .iter()
                    .map(|(id, order)| TaskRef::new(id.to_string(), *order))
                    .collect();

                Ok(Reorder {
                    board_id,
                    column,
                    tasks,
                    positions,
                })
            },
            move |identity, reorder| async move {
                TaskRepository::new(pool)
                    .reorder(
                        identity.tenant_id,
                        reorder.board_id,
                        reorder.column,
                        &reorder.positions,
                    )
                    .await?;
                log::debug!(
                    "{} moved {} tasks to column {} of board {}",
                    identity.subject,
                    reorder.positions.len(),
                    reorder.column,
                    reorder.board_id
                );
                Ok::<_, ApiError>(reorder)
            },
            |state, reorder| {
                state.move_tasks(&reorder.board_id.to_string(), reorder.column, &reorder.tasks);
            },
        )
        .await?;

    let reorder = refreshed.value;
    Ok((
        [(SET_COOKIE, refreshed.state_cookie)],
        Json(ReorderResponse {
            board_id: reorder.board_id.to_string(),
            column: reorder.column,
            tasks: reorder.tasks,
        }),
    )
        .into_response())
}

// =============================================================================
// Helpers
// =============================================================================

#[track_caller]
fn parse_uuid(field: &'static str, value: &str) -> ApiResult<Uuid> {
    UuidValidator::new(field).validate(value)?;
    Ok(Uuid::parse_str(value)?)
}

fn validate_content(title: &str, description: &str, subtasks: &[Subtask]) -> ApiResult<()> {
    TaskTitleValidator.validate(title)?;
    DescriptionValidator.validate(description)?;
    for subtask in subtasks {
        SubtaskTitleValidator.validate(&subtask.title)?;
    }
    Ok(())
}

/// Parse a JSON body. Failures are returned, not raised, so the guard can
/// report authentication problems first.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))
}
