use kb_core::Subtask;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub board_id: String,
    pub column: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}
