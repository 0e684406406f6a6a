//! Board store (projects → tasks → notes).
//!
//! # Responsibility
//! - Create/update/delete projects, tasks and notes.
//! - Track the current project, the edit-form mode and the task bound to
//!   the notes editor.
//!
//! # Invariants
//! - Task ids are unique across all projects; lookups by task id search
//!   every project.
//! - Deleting the current project selects the first remaining one.
//! - A failed save is logged and does not roll back the in-memory change.

use crate::config::PROJECTS_KEY;
use crate::model::board::{Project, Task, TaskStatus, TaskUpdate};
use crate::model::id::{IdAllocator, ProjectId, TaskId};
use crate::model::validation::{require_text, ValidationError};
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::state_repo::JsonStateRepository;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Board store failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Validation(ValidationError),
    /// Task creation without a target or current project.
    NoProjectSelected,
    /// Note operation while no task is bound to the notes editor.
    NoTaskSelected,
    /// Edit submit while the form is idle.
    NotEditing,
    ProjectNotFound(ProjectId),
    TaskNotFound(TaskId),
    NoteNotFound { task_id: TaskId, index: usize },
}

impl BoardError {
    /// Referential failures; callers treat them as silent no-ops.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotFound(_) | Self::TaskNotFound(_) | Self::NoteNotFound { .. }
        )
    }
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoProjectSelected => write!(f, "Create/select a project first!"),
            Self::NoTaskSelected => write!(f, "No task selected for notes!"),
            Self::NotEditing => write!(f, "No task is being edited."),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::NoteNotFound { task_id, index } => {
                write!(f, "note {index} not found on task {task_id}")
            }
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for BoardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Task form state: adding a new task, or editing an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(TaskId),
}

/// Project-scoped task store.
pub struct BoardStore<K: KeyValueStore> {
    repo: JsonStateRepository<K>,
    projects: Vec<Project>,
    ids: IdAllocator,
    current_project: Option<ProjectId>,
    edit_mode: EditMode,
    notes_task: Option<TaskId>,
}

impl<K: KeyValueStore> BoardStore<K> {
    /// Loads the `projects` document from `kv` and selects the first project.
    pub fn load(kv: K) -> Self {
        let repo = JsonStateRepository::new(kv);
        let projects: Vec<Project> = repo.load_or_default(PROJECTS_KEY);

        let mut ids = IdAllocator::new();
        for project in &projects {
            ids.observe(project.id.get());
            for task in &project.tasks {
                ids.observe(task.id.get());
            }
        }

        let current_project = projects.first().map(|project| project.id);
        info!(
            "event=board_load module=service status=ok projects={} tasks={}",
            projects.len(),
            projects.iter().map(|p| p.tasks.len()).sum::<usize>()
        );

        Self {
            repo,
            projects,
            ids,
            current_project,
            edit_mode: EditMode::Idle,
            notes_task: None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn current_project_id(&self) -> Option<ProjectId> {
        self.current_project
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current_project.and_then(|id| self.project(id))
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.projects.iter().find_map(|project| project.task(id))
    }

    /// Project owning task `id`.
    pub fn task_owner(&self, id: TaskId) -> Option<ProjectId> {
        self.projects
            .iter()
            .find(|project| project.task(id).is_some())
            .map(|project| project.id)
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn notes_task_id(&self) -> Option<TaskId> {
        self.notes_task
    }

    pub fn notes_task(&self) -> Option<&Task> {
        self.notes_task.and_then(|id| self.task(id))
    }

    pub fn medium(&self) -> &K {
        self.repo.medium()
    }

    pub fn create_project(&mut self, name: &str) -> BoardResult<ProjectId> {
        let name = require_text(name, ValidationError::EmptyProjectName)?;
        let id = ProjectId(self.ids.next_id());
        self.projects.push(Project::new(id, name));
        self.current_project = Some(id);
        info!("event=project_create module=service status=ok project_id={id}");
        self.persist();
        Ok(id)
    }

    /// Removes a project with all its tasks and notes.
    pub fn delete_project(&mut self, id: ProjectId) -> BoardResult<()> {
        let position = self
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or(BoardError::ProjectNotFound(id))?;
        let removed = self.projects.remove(position);

        if let EditMode::Editing(task_id) = self.edit_mode {
            if removed.task(task_id).is_some() {
                self.edit_mode = EditMode::Idle;
            }
        }
        if self
            .notes_task
            .is_some_and(|task_id| removed.task(task_id).is_some())
        {
            self.notes_task = None;
        }
        if self.current_project == Some(id) {
            self.current_project = self.projects.first().map(|project| project.id);
        }

        info!(
            "event=project_delete module=service status=ok project_id={id} cascaded_tasks={}",
            removed.tasks.len()
        );
        self.persist();
        Ok(())
    }

    pub fn select_project(&mut self, id: ProjectId) -> BoardResult<()> {
        if self.project(id).is_none() {
            return Err(BoardError::ProjectNotFound(id));
        }
        self.current_project = Some(id);
        debug!("event=project_select module=service status=ok project_id={id}");
        Ok(())
    }

    /// Appends a task to `project`, or to the current project when `None`.
    pub fn create_task(
        &mut self,
        project: Option<ProjectId>,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> BoardResult<TaskId> {
        let project_id = project
            .or(self.current_project)
            .ok_or(BoardError::NoProjectSelected)?;
        let title = require_text(title, ValidationError::EmptyTaskTitle)?;
        let position = self
            .project_position(project_id)
            .ok_or(BoardError::ProjectNotFound(project_id))?;

        let id = TaskId(self.ids.next_id());
        self.projects[position]
            .tasks
            .push(Task::new(id, title, description.trim(), status));
        info!(
            "event=task_create module=service status=ok project_id={project_id} task_id={id} task_status={status}"
        );
        self.persist();
        Ok(id)
    }

    /// Replaces title, description and status of task `id`.
    pub fn update_task(&mut self, id: TaskId, update: TaskUpdate) -> BoardResult<()> {
        let title = require_text(&update.title, ValidationError::EmptyTaskTitle)?;
        let task = self.task_mut(id).ok_or(BoardError::TaskNotFound(id))?;
        task.title = title;
        task.description = update.description.trim().to_string();
        task.status = update.status;
        info!(
            "event=task_update module=service status=ok task_id={id} task_status={}",
            update.status
        );
        self.persist();
        Ok(())
    }

    pub fn delete_task(&mut self, id: TaskId) -> BoardResult<()> {
        let project = self
            .projects
            .iter_mut()
            .find(|project| project.task(id).is_some())
            .ok_or(BoardError::TaskNotFound(id))?;
        project.tasks.retain(|task| task.id != id);

        if self.notes_task == Some(id) {
            self.notes_task = None;
        }
        if self.edit_mode == EditMode::Editing(id) {
            self.edit_mode = EditMode::Idle;
        }
        info!("event=task_delete module=service status=ok task_id={id}");
        self.persist();
        Ok(())
    }

    /// Moves task `id` into the `status` bucket.
    pub fn set_task_status(&mut self, id: TaskId, status: TaskStatus) -> BoardResult<()> {
        let task = self.task_mut(id).ok_or(BoardError::TaskNotFound(id))?;
        let previous = task.status;
        task.status = status;
        info!(
            "event=task_move module=service status=ok task_id={id} from={previous} to={status}"
        );
        self.persist();
        Ok(())
    }

    /// Appends a note and returns its index.
    pub fn add_note(&mut self, task_id: TaskId, text: &str) -> BoardResult<usize> {
        let text = require_text(text, ValidationError::EmptyNote)?;
        let task = self
            .task_mut(task_id)
            .ok_or(BoardError::TaskNotFound(task_id))?;
        task.notes.push(text);
        let index = task.notes.len() - 1;
        debug!("event=note_add module=service status=ok task_id={task_id} index={index}");
        self.persist();
        Ok(index)
    }

    /// Removes the note at `index` and returns its text.
    pub fn remove_note(&mut self, task_id: TaskId, index: usize) -> BoardResult<String> {
        let task = self
            .task_mut(task_id)
            .ok_or(BoardError::TaskNotFound(task_id))?;
        if index >= task.notes.len() {
            return Err(BoardError::NoteNotFound { task_id, index });
        }
        let removed = task.notes.remove(index);
        debug!("event=note_remove module=service status=ok task_id={task_id} index={index}");
        self.persist();
        Ok(removed)
    }

    /// Switches the form into edit mode for task `id`.
    pub fn begin_edit(&mut self, id: TaskId) -> BoardResult<()> {
        if self.task(id).is_none() {
            return Err(BoardError::TaskNotFound(id));
        }
        self.edit_mode = EditMode::Editing(id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.edit_mode = EditMode::Idle;
    }

    /// Applies the edit form; returns to `Idle` only on success.
    ///
    /// The edited task must belong to the current project; otherwise the
    /// submit is `TaskNotFound` and edit mode is kept.
    pub fn submit_edit(&mut self, update: TaskUpdate) -> BoardResult<TaskId> {
        let EditMode::Editing(id) = self.edit_mode else {
            return Err(BoardError::NotEditing);
        };
        if self.task_owner(id) != self.current_project {
            return Err(BoardError::TaskNotFound(id));
        }
        self.update_task(id, update)?;
        self.edit_mode = EditMode::Idle;
        Ok(id)
    }

    /// Binds the notes editor to task `id`.
    pub fn open_notes(&mut self, id: TaskId) -> BoardResult<()> {
        if self.task(id).is_none() {
            return Err(BoardError::TaskNotFound(id));
        }
        self.notes_task = Some(id);
        Ok(())
    }

    pub fn close_notes(&mut self) {
        self.notes_task = None;
    }

    /// Adds a note to whichever task the notes editor is bound to.
    pub fn add_note_to_open_task(&mut self, text: &str) -> BoardResult<usize> {
        require_text(text, ValidationError::EmptyNote)?;
        let task_id = self.notes_task.ok_or(BoardError::NoTaskSelected)?;
        self.add_note(task_id, text)
    }

    fn project_position(&self, id: ProjectId) -> Option<usize> {
        self.projects.iter().position(|project| project.id == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.projects
            .iter_mut()
            .find_map(|project| project.task_mut(id))
    }

    fn persist(&mut self) {
        if let Err(err) = self.repo.save(PROJECTS_KEY, &self.projects) {
            error!(
                "event=board_save module=service status=error error_code=save_failed error={err}"
            );
        }
    }
}
