use serde::{Deserialize, Serialize};

/// A task as seen by the state token: its ID and position in the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
    pub order: i64,
}

impl TaskRef {
    pub fn new(id: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            order,
        }
    }
}
