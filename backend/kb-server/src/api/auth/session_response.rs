use kb_core::User;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub username: String,
    pub role: String,
}

impl From<&User> for SessionResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}
