//! View renderer: pure projections of store state.
//!
//! # Responsibility
//! - Turn store state into row descriptors a surface can display.
//! - Produce markup in which every piece of user text is escaped.
//!
//! # Invariants
//! - Rendering never mutates a store and keeps no state of its own.
//! - User-supplied text only reaches markup through `escape_html`.

pub mod board_view;
pub mod element;
pub mod todo_view;

pub use board_view::{render_board, BoardView, Progress};
pub use element::ElementRef;
pub use todo_view::{render_todos, TodoListView};

/// Escapes `& < > " '` so text renders literally inside element content
/// and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
