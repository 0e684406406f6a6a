//! Flat-list projection: filtered rows, filter bar and empty state.

use crate::model::id::TodoId;
use crate::model::todo::TodoFilter;
use crate::render::element::ElementRef;
use crate::render::escape_html;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::todo_service::TodoStore;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: TodoId,
    pub dom_id: String,
    pub text: String,
    pub completed: bool,
    /// Row is playing its removal transition.
    pub removing: bool,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterButton {
    pub filter: TodoFilter,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListView {
    pub rows: Vec<TodoRow>,
    /// One button per filter; exactly one is active.
    pub filters: Vec<FilterButton>,
    pub empty: bool,
    pub empty_message: &'static str,
    pub items_left: usize,
}

impl TodoListView {
    pub fn active_filter(&self) -> Option<TodoFilter> {
        self.filters
            .iter()
            .find(|button| button.active)
            .map(|button| button.filter)
    }

    pub fn items_left_text(&self) -> String {
        match self.items_left {
            1 => "1 item left".to_string(),
            count => format!("{count} items left"),
        }
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

/// Projects the list store through its active filter.
pub fn render_todos<K: KeyValueStore>(store: &TodoStore<K>) -> TodoListView {
    let filter = store.filter();
    let rows = store
        .filtered()
        .into_iter()
        .map(|todo| TodoRow {
            id: todo.id,
            dom_id: ElementRef::Todo(todo.id).dom_id(),
            text: todo.text.clone(),
            completed: todo.completed,
            removing: store.is_removing(todo.id),
            created_at: todo.created_at,
        })
        .collect::<Vec<_>>();

    TodoListView {
        empty: rows.is_empty(),
        rows,
        filters: TodoFilter::ALL
            .into_iter()
            .map(|candidate| FilterButton {
                filter: candidate,
                active: candidate == filter,
            })
            .collect(),
        empty_message: empty_message(filter),
        items_left: store.active_count(),
    }
}

fn empty_message(filter: TodoFilter) -> &'static str {
    match filter {
        TodoFilter::All => "No tasks yet. Add one above!",
        TodoFilter::Active => "No active tasks.",
        TodoFilter::Completed => "No completed tasks.",
    }
}

impl Display for TodoListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<div class=\"filters\">")?;
        for button in &self.filters {
            write!(
                f,
                "<button class=\"filter-btn{}\" data-filter=\"{}\">{}</button>",
                if button.active { " active" } else { "" },
                button.filter.as_str(),
                button.filter.label()
            )?;
        }
        writeln!(f, "</div>")?;

        if self.empty {
            writeln!(f, "<p class=\"empty-state\">{}</p>", self.empty_message)?;
        } else {
            writeln!(f, "<ul id=\"todo-list\">")?;
            for row in &self.rows {
                let mut classes = String::from("todo-item");
                if row.completed {
                    classes.push_str(" completed");
                }
                if row.removing {
                    classes.push_str(" removing");
                }
                writeln!(
                    f,
                    "  <li class=\"{classes}\" id=\"{}\" data-id=\"{}\"><input type=\"checkbox\" class=\"toggle\"{}><span class=\"todo-text\">{}</span><button class=\"delete\" title=\"Delete\">×</button></li>",
                    row.dom_id,
                    row.id,
                    if row.completed { " checked" } else { "" },
                    escape_html(&row.text)
                )?;
            }
            writeln!(f, "</ul>")?;
        }

        write!(f, "<span class=\"todo-count\">{}</span>", self.items_left_text())
    }
}
