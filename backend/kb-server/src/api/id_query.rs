use serde::Deserialize;

/// `?id=` naming the board or task an endpoint acts on
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: String,
}

/// `?id=` on endpoints where it selects between two operations
#[derive(Debug, Default, Deserialize)]
pub struct OptionalIdQuery {
    pub id: Option<String>,
}
