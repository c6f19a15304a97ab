pub mod invite_response;
pub mod team;
