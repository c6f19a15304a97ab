use kb_core::{Subtask, Task};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TaskDto {
    pub id: String,
    pub board_id: String,
    pub column: usize,
    pub order: i64,
    pub title: String,
    pub description: String,
    pub subtasks: Vec<Subtask>,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            board_id: task.board_id.to_string(),
            column: task.column,
            order: task.order,
            title: task.title,
            description: task.description,
            subtasks: task.subtasks,
            created_at: task.created_at,
        }
    }
}
