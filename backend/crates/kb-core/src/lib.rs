pub mod error;
pub mod models;
pub mod state;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::board::Board;
pub use models::role::Role;
pub use models::subtask::Subtask;
pub use models::task::{Task, TaskPatch};
pub use models::team::Team;
pub use models::user::User;
pub use state::board_state::BoardState;
pub use state::column_state::ColumnState;
pub use state::task_ref::TaskRef;
pub use state::workspace_state::WorkspaceState;
pub use validation::{
    BoardNameValidator, ColumnIndexValidator, DescriptionValidator, IntValidator, OrderValidator,
    PasswordValidator, StringValidator, SubtaskTitleValidator, TaskTitleValidator, UsernameValidator,
    UuidValidator,
};

/// Every board is created with this many columns (ready, go, check, done).
pub const COLUMN_COUNT: usize = 4;
