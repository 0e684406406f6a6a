//! Headless core for the project board and flat to-do list widgets.
//!
//! State lives in explicit stores, persists as whole JSON documents in a
//! string-keyed medium, and is projected into escaped markup on every
//! change. UI toolkits plug in through the surface traits in `controller`.

pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use config::{CoreConfig, PROJECTS_KEY, TODOS_KEY};
pub use controller::{
    BoardController, BoardEvent, BoardSurface, ClickAction, Notice, Outcome, TodoController,
    TodoEvent, TodoSurface,
};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::board::{Project, Task, TaskStatus, TaskUpdate};
pub use model::id::{IdAllocator, ProjectId, TaskId, TodoId};
pub use model::todo::{Todo, TodoFilter};
pub use model::validation::ValidationError;
pub use render::{escape_html, render_board, render_todos, BoardView, ElementRef, TodoListView};
pub use repo::kv_repo::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use repo::state_repo::JsonStateRepository;
pub use repo::{RepoError, RepoResult};
pub use service::board_service::{BoardError, BoardResult, BoardStore, EditMode};
pub use service::todo_service::{TodoError, TodoResult, TodoStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
