use serde::Deserialize;

/// Body of board create and rename
#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    pub name: String,
}
