use crate::Role;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// PHC-formatted password hash, never the password itself
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub team_id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, team_id: Uuid, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            team_id,
            role,
            created_at: Utc::now(),
        }
    }
}
