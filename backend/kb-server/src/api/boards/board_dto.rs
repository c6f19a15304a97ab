use kb_core::{Board, BoardState, COLUMN_COUNT, ColumnState};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A board with the number of tasks in each of its columns
#[derive(Debug, Clone, Serialize)]
pub struct BoardDto {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub task_counts: Vec<usize>,
}

impl BoardDto {
    pub fn new(board: Board, task_counts: Vec<usize>) -> Self {
        Self {
            id: board.id.to_string(),
            name: board.name,
            created_at: board.created_at,
            task_counts,
        }
    }

    /// Per-column counts of a cached board, zeros when it is not cached
    pub fn task_counts(board: Option<&BoardState>) -> Vec<usize> {
        match board {
            Some(board) => board.columns.iter().map(ColumnState::task_count).collect(),
            None => vec![0; COLUMN_COUNT],
        }
    }
}
