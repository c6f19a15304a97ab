pub mod board_repository;
pub mod task_repository;
pub mod team_repository;
pub mod user_repository;
pub mod workspace_repository;
