use serde::Deserialize;

/// Bulk move: every listed task ends up in `column` of `board_id` at its `order`
#[derive(Debug, Deserialize)]
pub struct ReorderTasksRequest {
    pub board_id: String,
    pub column: i64,
    pub tasks: Vec<TaskOrderRequest>,
}

#[derive(Debug, Deserialize)]
pub struct TaskOrderRequest {
    pub id: String,
    pub order: i64,
}
