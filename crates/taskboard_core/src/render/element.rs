//! Element-id scheme shared by the renderer and the controller.
//!
//! Rendered elements carry ids such as `task-1700000000000` or
//! `note-1700000000000-2`; the surface reports gestures with those ids and
//! the controller parses them back into typed references.

use crate::model::board::TaskStatus;
use crate::model::id::{ProjectId, TaskId, TodoId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static ELEMENT_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(project|task|todo|column|note)-(.+)$").expect("valid element id regex")
});
static NOTE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d+)-(\d+)$").expect("valid note suffix regex"));

/// Typed reference to a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Project(ProjectId),
    Task(TaskId),
    Note { task_id: TaskId, index: usize },
    Column(TaskStatus),
    Todo(TodoId),
}

impl ElementRef {
    pub fn dom_id(&self) -> String {
        self.to_string()
    }

    /// Parses an element id; `None` for anything outside the scheme.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = ELEMENT_ID_RE.captures(raw.trim())?;
        let kind = caps.get(1)?.as_str();
        let rest = caps.get(2)?.as_str();
        match kind {
            "project" => rest.parse().ok().map(|id| Self::Project(ProjectId(id))),
            "task" => rest.parse().ok().map(|id| Self::Task(TaskId(id))),
            "todo" => rest.parse().ok().map(|id| Self::Todo(TodoId(id))),
            "column" => TaskStatus::parse(rest).map(Self::Column),
            "note" => {
                let note = NOTE_SUFFIX_RE.captures(rest)?;
                Some(Self::Note {
                    task_id: TaskId(note.get(1)?.as_str().parse().ok()?),
                    index: note.get(2)?.as_str().parse().ok()?,
                })
            }
            _ => None,
        }
    }

    /// Resolves a drag payload: a full `task-…` id or a bare numeric id.
    pub fn parse_task_payload(raw: &str) -> Option<TaskId> {
        match Self::parse(raw) {
            Some(Self::Task(id)) => Some(id),
            Some(_) => None,
            None => raw.trim().parse().ok().map(TaskId),
        }
    }
}

impl Display for ElementRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project(id) => write!(f, "project-{id}"),
            Self::Task(id) => write!(f, "task-{id}"),
            Self::Note { task_id, index } => write!(f, "note-{task_id}-{index}"),
            Self::Column(status) => write!(f, "column-{status}"),
            Self::Todo(id) => write!(f, "todo-{id}"),
        }
    }
}
