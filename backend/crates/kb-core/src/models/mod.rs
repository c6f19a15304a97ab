pub mod board;
pub mod role;
pub mod subtask;
pub mod task;
pub mod team;
pub mod user;
