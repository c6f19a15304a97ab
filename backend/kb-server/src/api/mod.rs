pub mod auth;
pub mod boards;
pub mod cookies;
pub mod delete_response;
pub mod error;
pub mod extractors;
pub mod id_query;
pub mod protocol;
pub mod tasks;
pub mod team;
