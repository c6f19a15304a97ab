use crate::{BoardState, ColumnState, TaskRef};

use serde::{Deserialize, Serialize};

/// The boards a caller may act on, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkspaceState {
    pub boards: Vec<BoardState>,
}

impl WorkspaceState {
    pub fn new(boards: Vec<BoardState>) -> Self {
        Self { boards }
    }

    pub fn board(&self, board_id: &str) -> Option<&BoardState> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    pub fn board_mut(&mut self, board_id: &str) -> Option<&mut BoardState> {
        self.boards.iter_mut().find(|b| b.id == board_id)
    }

    pub fn contains_board(&self, board_id: &str) -> bool {
        self.board(board_id).is_some()
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.board_of_task(task_id).is_some()
    }

    /// The board holding `task_id`, if the task is listed anywhere.
    pub fn board_of_task(&self, task_id: &str) -> Option<&BoardState> {
        self.boards.iter().find(|b| b.contains_task(task_id))
    }

    pub fn push_board(&mut self, board: BoardState) {
        self.boards.push(board);
    }

    pub fn remove_board(&mut self, board_id: &str) -> bool {
        let before = self.boards.len();
        self.boards.retain(|b| b.id != board_id);
        self.boards.len() != before
    }

    /// Appends a task to a column. Returns false when the board or column is unknown.
    pub fn push_task(&mut self, board_id: &str, column: usize, task: TaskRef) -> bool {
        match self
            .board_mut(board_id)
            .and_then(|b| b.columns.get_mut(column))
        {
            Some(col) => {
                col.push(task);
                true
            }
            None => false,
        }
    }

    pub fn remove_task(&mut self, task_id: &str) -> bool {
        self.boards
            .iter_mut()
            .flat_map(|b| b.columns.iter_mut())
            .any(|c| c.remove(task_id))
    }

    /// Moves `tasks` into `column` of `board_id` with their new orders, then
    /// sorts that column by order. Tasks are taken out of whichever column of
    /// the board currently lists them.
    pub fn move_tasks(&mut self, board_id: &str, column: usize, tasks: &[TaskRef]) -> bool {
        let Some(board) = self.board_mut(board_id) else {
            return false;
        };
        if column >= board.columns.len() {
            return false;
        }

        for task in tasks {
            for col in board.columns.iter_mut() {
                col.remove(&task.id);
            }
        }

        let target = &mut board.columns[column];
        if let ColumnState::Count(count) = target {
            // A count column only learns how many cards it gained.
            *count = count.saturating_add(tasks.len() as u32);
            return true;
        }
        for task in tasks {
            target.push(task.clone());
        }
        if let ColumnState::Tasks(list) = target {
            list.sort_by_key(|t| t.order);
        }
        true
    }
}
