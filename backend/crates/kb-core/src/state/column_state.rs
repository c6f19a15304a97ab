use crate::TaskRef;

use serde::{Deserialize, Serialize};

/// One column of a cached board.
///
/// `Tasks` lists every task in order. `Count` only records cardinality and is
/// used where the caller needs the column shape but not task-level access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnState {
    Tasks(Vec<TaskRef>),
    Count(u32),
}

impl ColumnState {
    pub fn empty() -> Self {
        Self::Tasks(Vec::new())
    }

    pub fn task_count(&self) -> usize {
        match self {
            Self::Tasks(tasks) => tasks.len(),
            Self::Count(count) => *count as usize,
        }
    }

    /// Count columns cannot prove membership, so they never contain a task.
    pub fn contains_task(&self, task_id: &str) -> bool {
        match self {
            Self::Tasks(tasks) => tasks.iter().any(|t| t.id == task_id),
            Self::Count(_) => false,
        }
    }

    pub fn tasks(&self) -> &[TaskRef] {
        match self {
            Self::Tasks(tasks) => tasks,
            Self::Count(_) => &[],
        }
    }

    /// Next free `order` value at the end of the column.
    pub fn next_order(&self) -> i64 {
        match self {
            Self::Tasks(tasks) => tasks.iter().map(|t| t.order + 1).max().unwrap_or(0),
            Self::Count(count) => i64::from(*count),
        }
    }

    pub fn push(&mut self, task: TaskRef) {
        match self {
            Self::Tasks(tasks) => tasks.push(task),
            Self::Count(count) => *count = count.saturating_add(1),
        }
    }

    pub fn remove(&mut self, task_id: &str) -> bool {
        match self {
            Self::Tasks(tasks) => {
                let before = tasks.len();
                tasks.retain(|t| t.id != task_id);
                tasks.len() != before
            }
            Self::Count(_) => false,
        }
    }
}
