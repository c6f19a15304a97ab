use crate::TaskDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: TaskDto,
}
