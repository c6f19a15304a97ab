use crate::row_decode;
use crate::{DbError, Result as DbErrorResult};

use kb_core::Board;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Boards, always scoped to the owning team.
///
/// Every statement filters on `team_id`, so a board ID from another team
/// behaves exactly like one that does not exist.
pub struct BoardRepository {
    pool: SqlitePool,
}

impl BoardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, board: &Board) -> DbErrorResult<()> {
        sqlx::query("INSERT INTO boards (id, team_id, name, created_at) VALUES (?, ?, ?, ?)")
            .bind(board.id.to_string())
            .bind(board.team_id.to_string())
            .bind(&board.name)
            .bind(board.created_at.timestamp())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, team_id: Uuid, id: Uuid) -> DbErrorResult<Option<Board>> {
        let row = sqlx::query(
            "SELECT id, team_id, name, created_at FROM boards WHERE id = ? AND team_id = ?",
        )
        .bind(id.to_string())
        .bind(team_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_board).transpose()
    }

    /// Boards of a team in creation order
    pub async fn list_by_team(&self, team_id: Uuid) -> DbErrorResult<Vec<Board>> {
        let rows = sqlx::query(
            r#"
                SELECT id, team_id, name, created_at
                FROM boards
                WHERE team_id = ?
                ORDER BY created_at, rowid
            "#,
        )
        .bind(team_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_board).collect()
    }

    pub async fn count_by_team(&self, team_id: Uuid) -> DbErrorResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards WHERE team_id = ?")
            .bind(team_id.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(count as usize)
    }

    pub async fn rename(&self, team_id: Uuid, id: Uuid, name: &str) -> DbErrorResult<()> {
        let result = sqlx::query("UPDATE boards SET name = ? WHERE id = ? AND team_id = ?")
            .bind(name)
            .bind(id.to_string())
            .bind(team_id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("board", id));
        }

        Ok(())
    }

    /// Delete a board together with its tasks, atomically.
    pub async fn delete(&self, team_id: Uuid, id: Uuid) -> DbErrorResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
                DELETE FROM tasks
                WHERE board_id = ?
                  AND board_id IN (SELECT id FROM boards WHERE team_id = ?)
            "#,
        )
        .bind(id.to_string())
        .bind(team_id.to_string())
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM boards WHERE id = ? AND team_id = ?")
            .bind(id.to_string())
            .bind(team_id.to_string())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(DbError::not_found("board", id));
        }

        tx.commit().await?;
        Ok(())
    }
}

fn map_board(row: &SqliteRow) -> DbErrorResult<Board> {
    Ok(Board {
        id: row_decode::uuid(row, "id")?,
        team_id: row_decode::uuid(row, "team_id")?,
        name: row.try_get("name")?,
        created_at: row_decode::timestamp(row, "created_at")?,
    })
}
