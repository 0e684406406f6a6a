//! Board gestures and their dispatch.

use crate::controller::{Notice, Outcome};
use crate::model::board::{TaskStatus, TaskUpdate};
use crate::model::id::{ProjectId, TaskId};
use crate::render::board_view::{render_board, BoardView};
use crate::render::element::ElementRef;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::board_service::{BoardError, BoardResult, BoardStore};
use log::{debug, info};

/// Display target for the board.
pub trait BoardSurface {
    fn present(&mut self, view: &BoardView);
    fn notify(&mut self, notice: &Notice);
}

/// Which control on a rendered element was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Select,
    Edit,
    Delete,
    Notes,
}

/// Every gesture the board understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    AddProject {
        name: String,
    },
    SelectProject(ProjectId),
    DeleteProject(ProjectId),
    AddTask {
        title: String,
        description: String,
        status: TaskStatus,
    },
    BeginEdit(TaskId),
    UpdateTask {
        title: String,
        description: String,
        status: TaskStatus,
    },
    CancelEdit,
    DeleteTask(TaskId),
    DragStart(TaskId),
    /// `payload` is whatever the transport carried; `None` falls back to
    /// the id recorded at drag start.
    Drop {
        target: TaskStatus,
        payload: Option<String>,
    },
    OpenNotes(TaskId),
    AddNote {
        text: String,
    },
    RemoveNote {
        task_id: TaskId,
        index: usize,
    },
    CloseNotes,
    /// Click that landed on the modal backdrop rather than its content.
    BackdropClick,
}

impl BoardEvent {
    /// Maps a click on a rendered element id to a gesture.
    pub fn from_click(element_id: &str, action: ClickAction) -> Option<Self> {
        match (ElementRef::parse(element_id)?, action) {
            (ElementRef::Project(id), ClickAction::Select) => Some(Self::SelectProject(id)),
            (ElementRef::Project(id), ClickAction::Delete) => Some(Self::DeleteProject(id)),
            (ElementRef::Task(id), ClickAction::Edit) => Some(Self::BeginEdit(id)),
            (ElementRef::Task(id), ClickAction::Delete) => Some(Self::DeleteTask(id)),
            (ElementRef::Task(id), ClickAction::Notes) => Some(Self::OpenNotes(id)),
            (ElementRef::Note { task_id, index }, ClickAction::Delete) => {
                Some(Self::RemoveNote { task_id, index })
            }
            _ => None,
        }
    }

    /// Drop onto a rendered column element id.
    pub fn drop_on(column_id: &str, payload: Option<String>) -> Option<Self> {
        match ElementRef::parse(column_id)? {
            ElementRef::Column(target) => Some(Self::Drop { target, payload }),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddProject { .. } => "add_project",
            Self::SelectProject(_) => "select_project",
            Self::DeleteProject(_) => "delete_project",
            Self::AddTask { .. } => "add_task",
            Self::BeginEdit(_) => "begin_edit",
            Self::UpdateTask { .. } => "update_task",
            Self::CancelEdit => "cancel_edit",
            Self::DeleteTask(_) => "delete_task",
            Self::DragStart(_) => "drag_start",
            Self::Drop { .. } => "drop",
            Self::OpenNotes(_) => "open_notes",
            Self::AddNote { .. } => "add_note",
            Self::RemoveNote { .. } => "remove_note",
            Self::CloseNotes => "close_notes",
            Self::BackdropClick => "backdrop_click",
        }
    }
}

/// Owns the board store and drives one surface.
pub struct BoardController<K: KeyValueStore, S: BoardSurface> {
    store: BoardStore<K>,
    surface: S,
    drag_payload: Option<String>,
}

impl<K: KeyValueStore, S: BoardSurface> BoardController<K, S> {
    pub fn new(store: BoardStore<K>, surface: S) -> Self {
        Self {
            store,
            surface,
            drag_payload: None,
        }
    }

    pub fn store(&self) -> &BoardStore<K> {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Payload recorded by the last drag start, if still in flight.
    pub fn drag_payload(&self) -> Option<&str> {
        self.drag_payload.as_deref()
    }

    pub fn into_parts(self) -> (BoardStore<K>, S) {
        (self.store, self.surface)
    }

    /// Renders the current state and presents it.
    pub fn refresh(&mut self) -> BoardView {
        let view = render_board(&self.store);
        self.surface.present(&view);
        view
    }

    pub fn dispatch(&mut self, event: BoardEvent) -> Outcome {
        let kind = event.kind();
        debug!("event=gesture module=controller status=start kind={kind}");

        let result = match event {
            BoardEvent::AddProject { name } => self.store.create_project(&name).map(drop),
            BoardEvent::SelectProject(id) => self.store.select_project(id),
            BoardEvent::DeleteProject(id) => self.store.delete_project(id),
            BoardEvent::AddTask {
                title,
                description,
                status,
            } => self
                .store
                .create_task(None, &title, &description, status)
                .map(drop),
            BoardEvent::BeginEdit(id) => self.store.begin_edit(id),
            BoardEvent::UpdateTask {
                title,
                description,
                status,
            } => self
                .store
                .submit_edit(TaskUpdate {
                    title,
                    description,
                    status,
                })
                .map(drop),
            BoardEvent::CancelEdit => {
                self.store.cancel_edit();
                Ok(())
            }
            BoardEvent::DeleteTask(id) => self.store.delete_task(id),
            BoardEvent::DragStart(id) => {
                self.drag_payload = None;
                if self.store.task(id).is_none() {
                    return self.ignore(kind, BoardError::TaskNotFound(id));
                }
                self.drag_payload = Some(id.to_string());
                return Outcome::Tracked;
            }
            BoardEvent::Drop { target, payload } => {
                let carried = payload.or_else(|| self.drag_payload.take());
                self.drag_payload = None;
                let Some(task_id) = carried.as_deref().and_then(ElementRef::parse_task_payload)
                else {
                    debug!("event=gesture module=controller status=ignored kind={kind} reason=unresolved_payload");
                    return Outcome::Ignored;
                };
                // Only cards of the shown project can be dropped.
                if self.store.task_owner(task_id) != self.store.current_project_id() {
                    return self.ignore(kind, BoardError::TaskNotFound(task_id));
                }
                self.store.set_task_status(task_id, target)
            }
            BoardEvent::OpenNotes(id) => self.store.open_notes(id),
            BoardEvent::AddNote { text } => self.store.add_note_to_open_task(&text).map(drop),
            BoardEvent::RemoveNote { task_id, index } => {
                self.store.remove_note(task_id, index).map(drop)
            }
            BoardEvent::CloseNotes | BoardEvent::BackdropClick => {
                self.store.close_notes();
                Ok(())
            }
        };

        self.settle(kind, result)
    }

    fn settle(&mut self, kind: &'static str, result: BoardResult<()>) -> Outcome {
        match result {
            Ok(()) => {
                self.refresh();
                Outcome::Applied
            }
            Err(err) if err.is_not_found() => self.ignore(kind, err),
            Err(err) => {
                info!("event=gesture module=controller status=rejected kind={kind} reason={err}");
                let notice = Notice::new(err.to_string());
                self.surface.notify(&notice);
                Outcome::Rejected(notice)
            }
        }
    }

    fn ignore(&self, kind: &'static str, err: BoardError) -> Outcome {
        debug!("event=gesture module=controller status=ignored kind={kind} reason={err}");
        Outcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardEvent, ClickAction};
    use crate::model::board::TaskStatus;
    use crate::model::id::{ProjectId, TaskId};

    #[test]
    fn clicks_map_to_gestures_by_element_and_action() {
        assert_eq!(
            BoardEvent::from_click("project-5", ClickAction::Delete),
            Some(BoardEvent::DeleteProject(ProjectId(5)))
        );
        assert_eq!(
            BoardEvent::from_click("task-8", ClickAction::Notes),
            Some(BoardEvent::OpenNotes(TaskId(8)))
        );
        assert_eq!(
            BoardEvent::from_click("note-8-1", ClickAction::Delete),
            Some(BoardEvent::RemoveNote {
                task_id: TaskId(8),
                index: 1
            })
        );
        assert_eq!(BoardEvent::from_click("task-8", ClickAction::Select), None);
        assert_eq!(BoardEvent::from_click("bogus", ClickAction::Delete), None);
    }

    #[test]
    fn drop_on_requires_a_column_id() {
        assert_eq!(
            BoardEvent::drop_on("column-completed", Some("8".to_string())),
            Some(BoardEvent::Drop {
                target: TaskStatus::Completed,
                payload: Some("8".to_string())
            })
        );
        assert_eq!(BoardEvent::drop_on("task-8", None), None);
    }
}
