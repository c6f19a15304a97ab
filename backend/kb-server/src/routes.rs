use crate::{
    AppState, create_board, create_invite, create_task, delete_board, delete_task, health,
    list_board_tasks, list_boards, login, patch_tasks, register, rename_board,
};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Session
        .route("/api/v1/register", post(register))
        .route("/api/v1/login", post(login))
        .route("/api/v1/team/invite", get(create_invite))
        // Boards
        .route(
            "/api/v1/boards",
            get(list_boards)
                .post(create_board)
                .patch(rename_board)
                .delete(delete_board),
        )
        .route("/api/v1/boards/{id}/tasks", get(list_board_tasks))
        // Tasks (PATCH without ?id= is the bulk reorder)
        .route(
            "/api/v1/tasks",
            post(create_task).patch(patch_tasks).delete(delete_task),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
