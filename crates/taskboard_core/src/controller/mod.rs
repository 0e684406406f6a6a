//! Interaction controllers: gesture events in, store calls and renders out.
//!
//! # Responsibility
//! - Translate discrete gesture events into store operations.
//! - Re-render after every applied gesture and hand the view to a surface.
//! - Surface validation failures as notices; swallow stale references.
//!
//! # Invariants
//! - Each controller is the only owner of its store.
//! - A rejected or ignored gesture never triggers a save.

pub mod board_controller;
pub mod todo_controller;

pub use board_controller::{BoardController, BoardEvent, BoardSurface, ClickAction};
pub use todo_controller::{TodoController, TodoEvent, TodoSurface, DEFAULT_REMOVAL_DELAY};

use std::fmt::{Display, Formatter};
use std::time::Duration;

/// User-facing message for a rejected gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of dispatching one gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Store changed (or selection moved) and a fresh view was presented.
    Applied,
    /// Gesture state was recorded without re-rendering (drag start).
    Tracked,
    /// Gesture referenced something that no longer exists.
    Ignored,
    /// Validation failed; the notice was sent to the surface.
    Rejected(Notice),
    /// Host must dispatch `commit` once `after` has elapsed.
    Deferred { commit: TodoEvent, after: Duration },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied | Self::Deferred { .. })
    }
}
