use crate::Subtask;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task card. `column` indexes into the board's fixed columns and `order`
/// is its position within that column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub board_id: Uuid,
    pub column: usize,
    pub order: i64,
    pub title: String,
    pub description: String,
    pub subtasks: Vec<Subtask>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        board_id: Uuid,
        column: usize,
        order: i64,
        title: String,
        description: String,
        subtasks: Vec<Subtask>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            column,
            order,
            title,
            description,
            subtasks,
            created_at: Utc::now(),
        }
    }
}

/// Editable fields of a task. Position changes go through reordering instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: String,
    pub description: String,
    pub subtasks: Vec<Subtask>,
}
