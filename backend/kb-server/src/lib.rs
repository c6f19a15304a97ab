pub mod api;
pub mod app_state;
pub mod database;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, register},
        credentials_request::CredentialsRequest,
        invite_query::InviteQuery,
        session_response::SessionResponse,
    },
    boards::{
        board_dto::BoardDto,
        board_list_response::BoardListResponse,
        board_request::BoardRequest,
        board_response::BoardResponse,
        board_tasks_response::BoardTasksResponse,
        boards::{create_board, delete_board, list_board_tasks, list_boards, rename_board},
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::token_cookies::TokenCookies,
    id_query::{IdQuery, OptionalIdQuery},
    tasks::{
        create_task_request::CreateTaskRequest,
        reorder_response::ReorderResponse,
        reorder_tasks_request::{ReorderTasksRequest, TaskOrderRequest},
        task_dto::TaskDto,
        task_response::TaskResponse,
        tasks::{create_task, delete_task, patch_tasks},
        update_task_request::UpdateTaskRequest,
    },
    team::{invite_response::InviteResponse, team::create_invite},
};
pub use app_state::{AppState, TokenSettings};

pub use crate::routes::build_router;
