use crate::row_decode;
use crate::{DbError, Result as DbErrorResult};

use kb_core::{Task, TaskPatch};

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

// Restricts a statement to tasks whose board belongs to the given team.
const TEAM_SCOPE: &str = "board_id IN (SELECT id FROM boards WHERE team_id = ?)";

/// Tasks, scoped to a team through their board.
pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a task. Fails with `NotFound` when the board is not part of the team.
    pub async fn create(&self, team_id: Uuid, task: &Task) -> DbErrorResult<()> {
        let subtasks = row_decode::to_json(&task.subtasks)?;

        let result = sqlx::query(
            r#"
                INSERT INTO tasks (
                    id, board_id, column_no, position, title, description, subtasks, created_at
                )
                SELECT ?, id, ?, ?, ?, ?, ?, ?
                FROM boards
                WHERE id = ? AND team_id = ?
            "#,
        )
        .bind(task.id.to_string())
        .bind(task.column as i64)
        .bind(task.order)
        .bind(&task.title)
        .bind(&task.description)
        .bind(subtasks)
        .bind(task.created_at.timestamp())
        .bind(task.board_id.to_string())
        .bind(team_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("board", task.board_id));
        }

        Ok(())
    }

    pub async fn find_by_id(&self, team_id: Uuid, id: Uuid) -> DbErrorResult<Option<Task>> {
        let sql = format!(
            r#"
                SELECT id, board_id, column_no, position, title, description, subtasks, created_at
                FROM tasks
                WHERE id = ? AND {TEAM_SCOPE}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .bind(team_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_task).transpose()
    }

    /// Tasks of a board, by column then position
    pub async fn find_by_board(&self, team_id: Uuid, board_id: Uuid) -> DbErrorResult<Vec<Task>> {
        let sql = format!(
            r#"
                SELECT id, board_id, column_no, position, title, description, subtasks, created_at
                FROM tasks
                WHERE board_id = ? AND {TEAM_SCOPE}
                ORDER BY column_no, position, rowid
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(board_id.to_string())
            .bind(team_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_task).collect()
    }

    pub async fn update(&self, team_id: Uuid, id: Uuid, patch: &TaskPatch) -> DbErrorResult<()> {
        let subtasks = row_decode::to_json(&patch.subtasks)?;
        let sql = format!(
            "UPDATE tasks SET title = ?, description = ?, subtasks = ? WHERE id = ? AND {TEAM_SCOPE}"
        );

        let result = sqlx::query(&sql)
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(subtasks)
            .bind(id.to_string())
            .bind(team_id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("task", id));
        }

        Ok(())
    }

    pub async fn delete(&self, team_id: Uuid, id: Uuid) -> DbErrorResult<()> {
        let sql = format!("DELETE FROM tasks WHERE id = ? AND {TEAM_SCOPE}");

        let result = sqlx::query(&sql)
            .bind(id.to_string())
            .bind(team_id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("task", id));
        }

        Ok(())
    }

    /// Move tasks into `column` of `board_id` with the given positions.
    ///
    /// All-or-nothing: if any task is not on that board of that team, nothing
    /// is changed and `NotFound` names the first offender.
    pub async fn reorder(
        &self,
        team_id: Uuid,
        board_id: Uuid,
        column: usize,
        positions: &[(Uuid, i64)],
    ) -> DbErrorResult<()> {
        let sql = format!(
            r#"
                UPDATE tasks SET column_no = ?, position = ?
                WHERE id = ? AND board_id = ? AND {TEAM_SCOPE}
            "#
        );

        let mut tx = self.pool.begin().await?;

        for (id, position) in positions {
            let result = sqlx::query(&sql)
                .bind(column as i64)
                .bind(*position)
                .bind(id.to_string())
                .bind(board_id.to_string())
                .bind(team_id.to_string())
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::not_found("task", id));
            }
        }

        tx.commit().await?;
        Ok(())
    }
}

fn map_task(row: &SqliteRow) -> DbErrorResult<Task> {
    Ok(Task {
        id: row_decode::uuid(row, "id")?,
        board_id: row_decode::uuid(row, "board_id")?,
        column: row_decode::column_index(row, "column_no")?,
        order: row.try_get("position")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        subtasks: row_decode::json(row, "subtasks")?,
        created_at: row_decode::timestamp(row, "created_at")?,
    })
}
