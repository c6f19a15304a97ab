use serde::Deserialize;

/// Join link parameters: `?invite=<token>`
#[derive(Debug, Default, Deserialize)]
pub struct InviteQuery {
    pub invite: Option<String>,
}
