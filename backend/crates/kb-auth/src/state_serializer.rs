//! Conversion between `WorkspaceState` and its untyped claim tree.
//!
//! Wire shape:
//!
//! ```text
//! { "boards": [ { "id": "...", "columns": [
//!     { "tasks": [ { "id": "...", "order": 0 }, ... ] }   // full column
//!     { "task_count": 3 }                                 // count-only column
//! ] } ] }
//! ```
//!
//! Decoding is recursive descent with one function per level. The first
//! shape violation fails the whole decode: a partially trusted capability
//! list is never returned.

use crate::claim_reader::{self, ClaimMap};
use crate::{AuthError, Result as AuthErrorResult, TokenPayload};

use kb_core::{BoardState, ColumnState, TaskRef, WorkspaceState};

use serde_json::Value;

const BOARDS_CLAIM: &str = "boards";
const ID_FIELD: &str = "id";
const COLUMNS_FIELD: &str = "columns";
const TASKS_FIELD: &str = "tasks";
const TASK_COUNT_FIELD: &str = "task_count";
const ORDER_FIELD: &str = "order";

/// Encode the hierarchy as claims, preserving board, column and task order.
pub fn encode_state(state: &WorkspaceState) -> ClaimMap {
    let boards = state.boards.iter().map(encode_board).collect();

    let mut claims = ClaimMap::new();
    claims.insert(BOARDS_CLAIM.into(), Value::Array(boards));
    claims
}

fn encode_board(board: &BoardState) -> Value {
    let columns = board.columns.iter().map(encode_column).collect();

    let mut map = ClaimMap::new();
    map.insert(ID_FIELD.into(), Value::from(board.id.as_str()));
    map.insert(COLUMNS_FIELD.into(), Value::Array(columns));
    Value::Object(map)
}

fn encode_column(column: &ColumnState) -> Value {
    let mut map = ClaimMap::new();
    match column {
        ColumnState::Tasks(tasks) => {
            let tasks = tasks.iter().map(encode_task).collect();
            map.insert(TASKS_FIELD.into(), Value::Array(tasks));
        }
        ColumnState::Count(count) => {
            map.insert(TASK_COUNT_FIELD.into(), Value::from(*count));
        }
    }
    Value::Object(map)
}

fn encode_task(task: &TaskRef) -> Value {
    let mut map = ClaimMap::new();
    map.insert(ID_FIELD.into(), Value::from(task.id.as_str()));
    map.insert(ORDER_FIELD.into(), Value::from(task.order));
    Value::Object(map)
}

/// Decode claims back into the hierarchy, all or nothing.
#[track_caller]
pub fn decode_state(claims: &ClaimMap) -> AuthErrorResult<WorkspaceState> {
    let boards = claim_reader::field(claims, BOARDS_CLAIM, "claims")?;
    let boards = claim_reader::as_array(boards, "claims.boards")?;

    let boards = boards
        .iter()
        .enumerate()
        .map(|(i, board)| decode_board(board, &format!("claims.boards[{i}]")))
        .collect::<AuthErrorResult<Vec<_>>>()?;

    Ok(WorkspaceState::new(boards))
}

fn decode_board(value: &Value, path: &str) -> AuthErrorResult<BoardState> {
    let map = claim_reader::as_object(value, path)?;
    let id = claim_reader::str_field(map, ID_FIELD, path)?;

    let columns_path = format!("{path}.{COLUMNS_FIELD}");
    let columns = claim_reader::field(map, COLUMNS_FIELD, path)?;
    let columns = claim_reader::as_array(columns, &columns_path)?
        .iter()
        .enumerate()
        .map(|(i, column)| decode_column(column, &format!("{columns_path}[{i}]")))
        .collect::<AuthErrorResult<Vec<_>>>()?;

    Ok(BoardState {
        id: id.to_string(),
        columns,
    })
}

fn decode_column(value: &Value, path: &str) -> AuthErrorResult<ColumnState> {
    let map = claim_reader::as_object(value, path)?;

    match (map.get(TASKS_FIELD), map.get(TASK_COUNT_FIELD)) {
        (Some(tasks), None) => {
            let tasks_path = format!("{path}.{TASKS_FIELD}");
            let tasks = claim_reader::as_array(tasks, &tasks_path)?
                .iter()
                .enumerate()
                .map(|(i, task)| decode_task(task, &format!("{tasks_path}[{i}]")))
                .collect::<AuthErrorResult<Vec<_>>>()?;
            Ok(ColumnState::Tasks(tasks))
        }
        (None, Some(count)) => {
            let count = claim_reader::as_u32(count, &format!("{path}.{TASK_COUNT_FIELD}"))?;
            Ok(ColumnState::Count(count))
        }
        (Some(_), Some(_)) => Err(AuthError::malformed(format!(
            "{path} has both {TASKS_FIELD} and {TASK_COUNT_FIELD}"
        ))),
        (None, None) => Err(AuthError::malformed(format!(
            "{path} needs {TASKS_FIELD} or {TASK_COUNT_FIELD}"
        ))),
    }
}

fn decode_task(value: &Value, path: &str) -> AuthErrorResult<TaskRef> {
    let map = claim_reader::as_object(value, path)?;
    let id = claim_reader::str_field(map, ID_FIELD, path)?;
    let order = claim_reader::i64_field(map, ORDER_FIELD, path)?;

    Ok(TaskRef::new(id, order))
}

impl TokenPayload for WorkspaceState {
    fn to_claims(&self) -> ClaimMap {
        encode_state(self)
    }

    #[track_caller]
    fn from_claims(claims: &ClaimMap) -> AuthErrorResult<Self> {
        decode_state(claims)
    }
}
