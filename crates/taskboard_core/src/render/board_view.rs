//! Board projection: project list, status columns, progress, task form
//! and notes modal.

use crate::model::board::{Project, Task, TaskStatus};
use crate::model::id::{ProjectId, TaskId};
use crate::render::element::ElementRef;
use crate::render::escape_html;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::board_service::{BoardStore, EditMode};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    pub id: ProjectId,
    pub dom_id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub dom_id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub note_count: usize,
    /// Card is the one loaded into the edit form.
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColumn {
    pub status: TaskStatus,
    pub dom_id: String,
    pub cards: Vec<TaskCard>,
}

/// Share of completed tasks in the current project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// `completed / total` as a percentage rounded half-up; `0` for no tasks.
    pub percent: u8,
}

impl Progress {
    pub fn of(project: Option<&Project>) -> Self {
        let Some(project) = project else {
            return Self::default();
        };
        Self::from_counts(project.completed_count(), project.tasks.len())
    }

    pub fn from_counts(completed: usize, total: usize) -> Self {
        if total == 0 {
            return Self::default();
        }
        let completed = completed.min(total);
        let percent = (completed * 200 + total) / (2 * total);
        Self {
            completed,
            total,
            percent: u8::try_from(percent).unwrap_or(100),
        }
    }

    pub fn text(&self) -> String {
        format!("{}% Completed", self.percent)
    }
}

/// Task form contents and button visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub mode: EditMode,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub show_add: bool,
    pub show_update: bool,
    pub show_cancel: bool,
}

impl TaskForm {
    fn idle() -> Self {
        Self {
            mode: EditMode::Idle,
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Pending,
            show_add: true,
            show_update: false,
            show_cancel: false,
        }
    }

    fn editing(task: &Task) -> Self {
        Self {
            mode: EditMode::Editing(task.id),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            show_add: false,
            show_update: true,
            show_cancel: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub dom_id: String,
    pub index: usize,
    pub text: String,
}

/// Notes modal. Hidden unless a task is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesPanel {
    pub visible: bool,
    pub task_id: Option<TaskId>,
    pub task_title: Option<String>,
    pub notes: Vec<NoteRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub projects: Vec<ProjectRow>,
    /// Always pending, in-progress, completed.
    pub columns: Vec<StatusColumn>,
    pub progress: Progress,
    pub form: TaskForm,
    pub notes: NotesPanel,
}

impl BoardView {
    pub fn column(&self, status: TaskStatus) -> Option<&StatusColumn> {
        self.columns.iter().find(|column| column.status == status)
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

/// Projects the board store into a view.
pub fn render_board<K: KeyValueStore>(store: &BoardStore<K>) -> BoardView {
    let current = store.current_project();
    let editing_id = match store.edit_mode() {
        EditMode::Editing(id) => Some(id),
        EditMode::Idle => None,
    };

    let projects = store
        .projects()
        .iter()
        .map(|project| ProjectRow {
            id: project.id,
            dom_id: ElementRef::Project(project.id).dom_id(),
            name: project.name.clone(),
            active: Some(project.id) == store.current_project_id(),
        })
        .collect();

    let columns = TaskStatus::ALL
        .into_iter()
        .map(|status| StatusColumn {
            status,
            dom_id: ElementRef::Column(status).dom_id(),
            cards: current
                .map(|project| {
                    project
                        .tasks_with_status(status)
                        .map(|task| task_card(task, editing_id))
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect();

    let form = editing_id
        .and_then(|id| store.task(id))
        .map_or_else(TaskForm::idle, TaskForm::editing);

    let notes_task = store.notes_task();
    let notes = NotesPanel {
        visible: notes_task.is_some(),
        task_id: notes_task.map(|task| task.id),
        task_title: notes_task.map(|task| task.title.clone()),
        notes: notes_task
            .map(|task| {
                task.notes
                    .iter()
                    .enumerate()
                    .map(|(index, text)| NoteRow {
                        dom_id: ElementRef::Note {
                            task_id: task.id,
                            index,
                        }
                        .dom_id(),
                        index,
                        text: text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    };

    BoardView {
        projects,
        columns,
        progress: Progress::of(current),
        form,
        notes,
    }
}

fn task_card(task: &Task, editing_id: Option<TaskId>) -> TaskCard {
    TaskCard {
        id: task.id,
        dom_id: ElementRef::Task(task.id).dom_id(),
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status,
        note_count: task.notes.len(),
        editing: editing_id == Some(task.id),
    }
}

fn display_style(visible: bool) -> &'static str {
    if visible {
        "inline-block"
    } else {
        "none"
    }
}

impl Display for BoardView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "<ul id=\"project-list\">")?;
        for project in &self.projects {
            writeln!(
                f,
                "  <li id=\"{}\" data-id=\"{}\"{}>{}<button class=\"delete-project\" title=\"Delete project\">🗑</button></li>",
                project.dom_id,
                project.id,
                if project.active { " class=\"active\"" } else { "" },
                escape_html(&project.name)
            )?;
        }
        writeln!(f, "</ul>")?;

        writeln!(
            f,
            "<form id=\"task-form\"><input id=\"task-title\" value=\"{}\"><textarea id=\"task-desc\">{}</textarea><select id=\"task-status\" data-value=\"{}\"></select>",
            escape_html(&self.form.title),
            escape_html(&self.form.description),
            self.form.status
        )?;
        writeln!(
            f,
            "  <button id=\"add-task\" style=\"display: {}\">Add Task</button><button id=\"update-task\" style=\"display: {}\">Update Task</button><button id=\"cancel-edit\" style=\"display: {}\">Cancel</button>",
            display_style(self.form.show_add),
            display_style(self.form.show_update),
            display_style(self.form.show_cancel)
        )?;
        writeln!(f, "</form>")?;

        for column in &self.columns {
            writeln!(
                f,
                "<section class=\"column\" id=\"{}\"><h2>{}</h2><div class=\"task-list\">",
                column.dom_id,
                column.status.label()
            )?;
            for card in &column.cards {
                writeln!(
                    f,
                    "  <div class=\"task {}{}\" id=\"{}\" data-id=\"{}\" draggable=\"true\"><strong>{}</strong><p>{}</p><div class=\"task-actions\"><button class=\"edit\" title=\"Edit\">✎</button><button class=\"delete\" title=\"Delete\">🗑</button><button class=\"notes\" title=\"Notes\">📝 {}</button></div></div>",
                    card.status,
                    if card.editing { " editing" } else { "" },
                    card.dom_id,
                    card.id,
                    escape_html(&card.title),
                    escape_html(&card.description),
                    card.note_count
                )?;
            }
            writeln!(f, "</div></section>")?;
        }

        writeln!(
            f,
            "<div class=\"progress\"><div class=\"progress-fill\" style=\"width: {}%\"></div><span class=\"progress-text\">{}</span></div>",
            self.progress.percent,
            self.progress.text()
        )?;

        writeln!(
            f,
            "<div id=\"notes-modal\" style=\"display: {}\"><span class=\"close\">&times;</span>",
            if self.notes.visible { "block" } else { "none" }
        )?;
        if let Some(title) = &self.notes.task_title {
            writeln!(f, "  <h3>{}</h3>", escape_html(title))?;
        }
        writeln!(f, "  <ul id=\"notes-list\">")?;
        if self.notes.task_id.is_none() {
            writeln!(f, "    <li>No task selected.</li>")?;
        }
        for note in &self.notes.notes {
            writeln!(
                f,
                "    <li id=\"{}\">{}<button class=\"delete-note\">🗑</button></li>",
                note.dom_id,
                escape_html(&note.text)
            )?;
        }
        write!(f, "  </ul>\n</div>")
    }
}

#[cfg(test)]
mod tests {
    use super::Progress;

    #[test]
    fn progress_rounds_to_nearest_percent() {
        assert_eq!(Progress::from_counts(0, 0).percent, 0);
        assert_eq!(Progress::from_counts(2, 4).percent, 50);
        assert_eq!(Progress::from_counts(1, 3).percent, 33);
        assert_eq!(Progress::from_counts(2, 3).percent, 67);
        assert_eq!(Progress::from_counts(1, 8).percent, 13);
        assert_eq!(Progress::from_counts(5, 5).percent, 100);
    }

    #[test]
    fn progress_text_matches_widget_label() {
        assert_eq!(Progress::from_counts(1, 2).text(), "50% Completed");
        assert_eq!(Progress::of(None).text(), "0% Completed");
    }
}
