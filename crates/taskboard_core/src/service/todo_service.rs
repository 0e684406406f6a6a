//! Flat-list store.
//!
//! # Responsibility
//! - Create, edit, toggle and delete list items.
//! - Hold the transient filter and the set of items mid-removal.
//!
//! # Invariants
//! - `filter` and `removing` are never persisted.
//! - An item marked as removing stays in the persisted document until
//!   `finish_remove` runs.

use crate::config::TODOS_KEY;
use crate::model::id::{now_epoch_ms, IdAllocator, TodoId};
use crate::model::todo::{Todo, TodoFilter};
use crate::model::validation::{require_text, ValidationError};
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::state_repo::JsonStateRepository;
use log::{debug, error, info};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    Validation(ValidationError),
    TodoNotFound(TodoId),
}

impl TodoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TodoNotFound(_))
    }
}

impl Display for TodoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TodoNotFound(id) => write!(f, "todo not found: {id}"),
        }
    }
}

impl Error for TodoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::TodoNotFound(_) => None,
        }
    }
}

impl From<ValidationError> for TodoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Flat to-do list store.
pub struct TodoStore<K: KeyValueStore> {
    repo: JsonStateRepository<K>,
    todos: Vec<Todo>,
    ids: IdAllocator,
    filter: TodoFilter,
    removing: BTreeSet<TodoId>,
}

impl<K: KeyValueStore> TodoStore<K> {
    /// Loads the `todos` document from `kv` with the `All` filter active.
    pub fn load(kv: K) -> Self {
        let repo = JsonStateRepository::new(kv);
        let todos: Vec<Todo> = repo.load_or_default(TODOS_KEY);
        let ids = IdAllocator::seeded(todos.iter().map(|todo| todo.id.get()).max().unwrap_or(0));
        info!(
            "event=todo_load module=service status=ok todos={}",
            todos.len()
        );

        Self {
            repo,
            todos,
            ids,
            filter: TodoFilter::All,
            removing: BTreeSet::new(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
    }

    /// Items matching the active filter, in insertion order.
    pub fn filtered(&self) -> Vec<&Todo> {
        self.filtered_by(self.filter)
    }

    pub fn filtered_by(&self, filter: TodoFilter) -> Vec<&Todo> {
        self.todos.iter().filter(|todo| filter.matches(todo)).collect()
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.len() - self.active_count()
    }

    pub fn is_removing(&self, id: TodoId) -> bool {
        self.removing.contains(&id)
    }

    pub fn medium(&self) -> &K {
        self.repo.medium()
    }

    pub fn create_todo(&mut self, text: &str) -> TodoResult<TodoId> {
        let text = require_text(text, ValidationError::EmptyTodoText)?;
        let id = TodoId(self.ids.next_id());
        self.todos.push(Todo::new(id, text, now_epoch_ms()));
        info!("event=todo_create module=service status=ok todo_id={id}");
        self.persist();
        Ok(id)
    }

    /// Replaces the text of item `id`.
    pub fn update_todo(&mut self, id: TodoId, text: &str) -> TodoResult<()> {
        let text = require_text(text, ValidationError::EmptyTodoText)?;
        let todo = self.todo_mut(id)?;
        todo.text = text;
        debug!("event=todo_update module=service status=ok todo_id={id}");
        self.persist();
        Ok(())
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_todo(&mut self, id: TodoId) -> TodoResult<bool> {
        let todo = self.todo_mut(id)?;
        todo.completed = !todo.completed;
        let completed = todo.completed;
        debug!("event=todo_toggle module=service status=ok todo_id={id} completed={completed}");
        self.persist();
        Ok(completed)
    }

    pub fn delete_todo(&mut self, id: TodoId) -> TodoResult<()> {
        let position = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(TodoError::TodoNotFound(id))?;
        self.todos.remove(position);
        self.removing.remove(&id);
        info!("event=todo_delete module=service status=ok todo_id={id}");
        self.persist();
        Ok(())
    }

    /// Drops every completed item; returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|todo| !todo.completed);
        let removed = before - self.todos.len();
        if removed > 0 {
            let todos = &self.todos;
            self.removing
                .retain(|id| todos.iter().any(|todo| todo.id == *id));
            info!("event=todo_clear_completed module=service status=ok removed={removed}");
            self.persist();
        }
        removed
    }

    /// First phase of a delete: flags the item for the removal transition
    /// without touching persisted state.
    pub fn begin_remove(&mut self, id: TodoId) -> TodoResult<()> {
        if self.todo(id).is_none() {
            return Err(TodoError::TodoNotFound(id));
        }
        self.removing.insert(id);
        Ok(())
    }

    /// Second phase of a delete, run by the deferred callback.
    pub fn finish_remove(&mut self, id: TodoId) -> TodoResult<()> {
        self.delete_todo(id)
    }

    fn todo_mut(&mut self, id: TodoId) -> TodoResult<&mut Todo> {
        self.todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(TodoError::TodoNotFound(id))
    }

    fn persist(&mut self) {
        if let Err(err) = self.repo.save(TODOS_KEY, &self.todos) {
            error!(
                "event=todo_save module=service status=error error_code=save_failed error={err}"
            );
        }
    }
}
