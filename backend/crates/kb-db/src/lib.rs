pub mod error;
pub mod repositories;
mod row_decode;

pub use error::{DbError, Result};
pub use repositories::board_repository::BoardRepository;
pub use repositories::task_repository::TaskRepository;
pub use repositories::team_repository::TeamRepository;
pub use repositories::user_repository::UserRepository;
pub use repositories::workspace_repository::WorkspaceRepository;

/// Embedded schema migrations, run once at startup
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
