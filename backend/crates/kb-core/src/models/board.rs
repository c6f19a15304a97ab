use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A kanban board owned by a team. Its columns are implicit: every board has
/// `COLUMN_COUNT` of them, addressed by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(team_id: Uuid, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            name,
            created_at: Utc::now(),
        }
    }
}
