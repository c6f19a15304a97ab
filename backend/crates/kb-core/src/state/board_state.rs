use crate::{COLUMN_COUNT, ColumnState};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub id: String,
    pub columns: Vec<ColumnState>,
}

impl BoardState {
    /// A freshly created board: `COLUMN_COUNT` empty task columns.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            columns: (0..COLUMN_COUNT).map(|_| ColumnState::empty()).collect(),
        }
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.columns.iter().any(|c| c.contains_task(task_id))
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(ColumnState::task_count).sum()
    }
}
