use crate::TaskDto;

use serde::Serialize;

/// Tasks of one board, one list per column, each ordered by position
#[derive(Debug, Serialize)]
pub struct BoardTasksResponse {
    pub board_id: String,
    pub columns: Vec<Vec<TaskDto>>,
}
