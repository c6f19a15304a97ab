use crate::BoardDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BoardListResponse {
    pub boards: Vec<BoardDto>,
}
