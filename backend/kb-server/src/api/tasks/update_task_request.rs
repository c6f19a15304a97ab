use kb_core::Subtask;

use serde::Deserialize;

/// Replaces the editable fields of a task
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}
