use kb_core::{Board, Role, Subtask, Task, Team, User};
use kb_db::{BoardRepository, TaskRepository, TeamRepository, UserRepository};

use sqlx::SqlitePool;
use uuid::Uuid;

/// Inserts a fresh team and returns its ID
pub async fn create_test_team(pool: &SqlitePool) -> Uuid {
    let team = Team::new();
    TeamRepository::new(pool.clone())
        .create(&team)
        .await
        .expect("Failed to create test team");
    team.id
}

pub fn create_test_user(team_id: Uuid, username: &str, role: Role) -> User {
    User::new(username.to_string(), "hash".to_string(), team_id, role)
}

/// Inserts a board named `name` into the team
pub async fn create_test_board(pool: &SqlitePool, team_id: Uuid, name: &str) -> Board {
    let board = Board::new(team_id, name.to_string());
    BoardRepository::new(pool.clone())
        .create(&board)
        .await
        .expect("Failed to create test board");
    board
}

/// Inserts a task into a board column at the given position
pub async fn create_test_task(
    pool: &SqlitePool,
    team_id: Uuid,
    board_id: Uuid,
    column: usize,
    order: i64,
) -> Task {
    let task = Task::new(
        board_id,
        column,
        order,
        format!("Task {order}"),
        "Test description".to_string(),
        vec![Subtask {
            title: "First step".to_string(),
            done: false,
        }],
    );
    TaskRepository::new(pool.clone())
        .create(team_id, &task)
        .await
        .expect("Failed to create test task");
    task
}

pub async fn insert_user(pool: &SqlitePool, user: &User) {
    UserRepository::new(pool.clone())
        .create(user)
        .await
        .expect("Failed to create test user");
}
