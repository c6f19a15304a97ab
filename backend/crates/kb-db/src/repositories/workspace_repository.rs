use crate::row_decode;
use crate::{DbError, Result as DbErrorResult};

use kb_core::{BoardState, TaskRef, WorkspaceState};

use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Derives the cached workspace view from authoritative storage.
pub struct WorkspaceRepository {
    pool: SqlitePool,
}

impl WorkspaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Every board of the team in creation order, each with all of its tasks
    /// listed per column by position.
    pub async fn load_state(&self, team_id: Uuid) -> DbErrorResult<WorkspaceState> {
        let team = team_id.to_string();

        let board_rows = sqlx::query(
            "SELECT id FROM boards WHERE team_id = ? ORDER BY created_at, rowid",
        )
        .bind(&team)
        .fetch_all(&self.pool)
        .await?;

        let mut state = WorkspaceState::default();
        for row in &board_rows {
            let id: String = row.try_get("id")?;
            state.push_board(BoardState::new(id));
        }

        let task_rows = sqlx::query(
            r#"
                SELECT t.id, t.board_id, t.column_no, t.position
                FROM tasks t
                JOIN boards b ON b.id = t.board_id
                WHERE b.team_id = ?
                ORDER BY t.board_id, t.column_no, t.position, t.rowid
            "#,
        )
        .bind(&team)
        .fetch_all(&self.pool)
        .await?;

        for row in &task_rows {
            let board_id: String = row.try_get("board_id")?;
            let column = row_decode::column_index(row, "column_no")?;
            let task = TaskRef::new(row.try_get::<String, _>("id")?, row.try_get("position")?);

            if !state.push_task(&board_id, column, task) {
                return Err(DbError::Initialization {
                    message: format!("task row references unknown board {board_id}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        log::debug!(
            "Loaded workspace state for team {}: {} boards, {} tasks",
            team_id,
            state.boards.len(),
            task_rows.len()
        );

        Ok(state)
    }
}
