//! Flat-list gestures and their dispatch.

use crate::controller::{Notice, Outcome};
use crate::model::id::TodoId;
use crate::model::todo::TodoFilter;
use crate::render::todo_view::{render_todos, TodoListView};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::todo_service::{TodoError, TodoResult, TodoStore};
use log::{debug, info};
use std::time::Duration;

/// Length of the removal transition before a delete is committed.
pub const DEFAULT_REMOVAL_DELAY: Duration = Duration::from_millis(300);

/// Display target for the flat list.
pub trait TodoSurface {
    fn present(&mut self, view: &TodoListView);
    fn notify(&mut self, notice: &Notice);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoEvent {
    Add { text: String },
    Toggle(TodoId),
    Edit { id: TodoId, text: String },
    /// Delete button: starts the removal transition.
    RequestDelete(TodoId),
    /// Deferred callback fired after the transition.
    CommitDelete(TodoId),
    ClearCompleted,
    SetFilter(TodoFilter),
}

impl TodoEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Toggle(_) => "toggle",
            Self::Edit { .. } => "edit",
            Self::RequestDelete(_) => "request_delete",
            Self::CommitDelete(_) => "commit_delete",
            Self::ClearCompleted => "clear_completed",
            Self::SetFilter(_) => "set_filter",
        }
    }
}

/// Owns the list store and drives one surface.
pub struct TodoController<K: KeyValueStore, S: TodoSurface> {
    store: TodoStore<K>,
    surface: S,
    removal_delay: Duration,
}

impl<K: KeyValueStore, S: TodoSurface> TodoController<K, S> {
    pub fn new(store: TodoStore<K>, surface: S) -> Self {
        Self {
            store,
            surface,
            removal_delay: DEFAULT_REMOVAL_DELAY,
        }
    }

    /// A zero delay commits deletes immediately, skipping the transition.
    pub fn with_removal_delay(mut self, delay: Duration) -> Self {
        self.removal_delay = delay;
        self
    }

    pub fn store(&self) -> &TodoStore<K> {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_parts(self) -> (TodoStore<K>, S) {
        (self.store, self.surface)
    }

    pub fn refresh(&mut self) -> TodoListView {
        let view = render_todos(&self.store);
        self.surface.present(&view);
        view
    }

    pub fn dispatch(&mut self, event: TodoEvent) -> Outcome {
        let kind = event.kind();
        debug!("event=gesture module=controller status=start kind={kind}");

        let result = match event {
            TodoEvent::Add { text } => self.store.create_todo(&text).map(drop),
            TodoEvent::Toggle(id) => self.store.toggle_todo(id).map(drop),
            TodoEvent::Edit { id, text } => self.store.update_todo(id, &text),
            TodoEvent::RequestDelete(id) if self.removal_delay.is_zero() => {
                self.store.delete_todo(id)
            }
            TodoEvent::RequestDelete(id) => {
                if let Err(err) = self.store.begin_remove(id) {
                    return self.settle(kind, Err(err));
                }
                self.refresh();
                return Outcome::Deferred {
                    commit: TodoEvent::CommitDelete(id),
                    after: self.removal_delay,
                };
            }
            TodoEvent::CommitDelete(id) => self.store.finish_remove(id),
            TodoEvent::ClearCompleted => {
                self.store.clear_completed();
                Ok(())
            }
            TodoEvent::SetFilter(filter) => {
                self.store.set_filter(filter);
                Ok(())
            }
        };

        self.settle(kind, result)
    }

    fn settle(&mut self, kind: &'static str, result: TodoResult<()>) -> Outcome {
        match result {
            Ok(()) => {
                self.refresh();
                Outcome::Applied
            }
            Err(err @ TodoError::TodoNotFound(_)) => {
                debug!("event=gesture module=controller status=ignored kind={kind} reason={err}");
                Outcome::Ignored
            }
            Err(err) => {
                info!("event=gesture module=controller status=rejected kind={kind} reason={err}");
                let notice = Notice::new(err.to_string());
                self.surface.notify(&notice);
                Outcome::Rejected(notice)
            }
        }
    }
}
