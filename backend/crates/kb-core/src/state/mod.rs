//! Cached view of a team's hierarchy as carried inside the state token.
//!
//! This is a capability list, not the hierarchy itself: it records which
//! board and task IDs a caller may act on, and in which order they appear.
//! Storage stays the source of truth for every value.

pub mod board_state;
pub mod column_state;
pub mod task_ref;
pub mod workspace_state;
