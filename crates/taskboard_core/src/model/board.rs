//! Board (project-scoped) entities.
//!
//! # Invariants
//! - A task is owned by exactly one project; a note by exactly one task.
//! - `title` is non-empty after trim for every stored task.
//! - Serialized field names match the `projects` document written by the
//!   browser widget (`desc`, kebab-case statuses).

use crate::model::id::{ProjectId, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fixed status bucket of a board task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Column order used by the board view.
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One work item on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Free-text annotations, addressed by position.
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Task {
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status,
            notes: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Named container of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    /// Tasks in `status`, in insertion order.
    pub fn tasks_with_status(&self, status: TaskStatus) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| task.status == status)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_completed()).count()
    }
}

/// Replacement fields for an edit-form submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::{Project, Task, TaskStatus};
    use crate::model::id::{ProjectId, TaskId};

    #[test]
    fn status_wire_names_are_kebab_case() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("done"), None);
    }

    #[test]
    fn task_uses_desc_wire_field() {
        let task = Task::new(TaskId(7), "write docs", "api section", TaskStatus::InProgress);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["desc"], "api section");
        assert_eq!(json["status"], "in-progress");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn project_document_without_optional_fields_still_loads() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Home",
            "tasks": [{ "id": 2, "title": "sweep" }]
        }))
        .unwrap();
        assert_eq!(project.id, ProjectId(1));
        assert_eq!(project.tasks[0].status, TaskStatus::Pending);
        assert!(project.tasks[0].notes.is_empty());
    }
}
