pub mod auth;
pub mod credentials_request;
pub mod invite_query;
pub mod session_response;
