use crate::Result as DbErrorResult;

use kb_core::Team;

use sqlx::SqlitePool;
use uuid::Uuid;

pub struct TeamRepository {
    pool: SqlitePool,
}

impl TeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, team: &Team) -> DbErrorResult<()> {
        sqlx::query("INSERT INTO teams (id, created_at) VALUES (?, ?)")
            .bind(team.id.to_string())
            .bind(team.created_at.timestamp())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn exists(&self, id: Uuid) -> DbErrorResult<bool> {
        let found = sqlx::query("SELECT 1 FROM teams WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }
}
