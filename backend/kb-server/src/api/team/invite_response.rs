use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub invite_token: String,
    pub expires_at: DateTime<Utc>,
}
