use kb_core::TaskRef;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub board_id: String,
    pub column: usize,
    pub tasks: Vec<TaskRef>,
}
