use crate::row_decode;
use crate::{DbError, Result as DbErrorResult};

use kb_core::User;

use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user. A taken username is reported as `DbError::Conflict`.
    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        let result = sqlx::query(
            r#"
                INSERT INTO users (id, username, password_hash, team_id, role, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.team_id.to_string())
        .bind(user.role.as_str())
        .bind(user.created_at.timestamp())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(DbError::Conflict {
                message: format!("username {} is taken", user.username),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, username, password_hash, team_id, role, created_at
                FROM users
                WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }
}

fn map_user(row: &SqliteRow) -> DbErrorResult<User> {
    Ok(User {
        id: row_decode::uuid(row, "id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        team_id: row_decode::uuid(row, "team_id")?,
        role: row_decode::parsed(row, "role")?,
        created_at: row_decode::timestamp(row, "created_at")?,
    })
}
