use taskboard_core::{
    BoardError, BoardStore, EditMode, KeyValueStore, MemoryKvStore, TaskStatus, TaskUpdate,
    ValidationError, PROJECTS_KEY,
};

fn board() -> BoardStore<MemoryKvStore> {
    BoardStore::load(MemoryKvStore::new())
}

fn persisted(store: &BoardStore<MemoryKvStore>) -> serde_json::Value {
    let raw = store.medium().get(PROJECTS_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn create_project_selects_it_and_persists() {
    let mut store = board();
    let first = store.create_project("  Work  ").unwrap();
    let second = store.create_project("Home").unwrap();

    assert_eq!(store.projects().len(), 2);
    assert_eq!(store.project(first).unwrap().name, "Work");
    assert_eq!(store.current_project_id(), Some(second));

    let json = persisted(&store);
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["name"], "Work");
    assert_eq!(json[0]["tasks"], serde_json::json!([]));
}

#[test]
fn blank_project_name_is_rejected_without_side_effects() {
    let mut store = board();
    let err = store.create_project(" \t ").unwrap_err();
    assert_eq!(err, BoardError::Validation(ValidationError::EmptyProjectName));
    assert!(store.projects().is_empty());
    assert!(store.medium().get(PROJECTS_KEY).unwrap().is_none());
}

#[test]
fn create_task_adds_exactly_one_retrievable_task() {
    let mut store = board();
    let project = store.create_project("Work").unwrap();
    let task = store
        .create_task(None, " Write report ", "  q3 numbers ", TaskStatus::InProgress)
        .unwrap();

    let owner = store.project(project).unwrap();
    assert_eq!(owner.tasks.len(), 1);
    let loaded = store.task(task).unwrap();
    assert_eq!(loaded.title, "Write report");
    assert_eq!(loaded.description, "q3 numbers");
    assert_eq!(loaded.status, TaskStatus::InProgress);
    assert_eq!(store.task_owner(task), Some(project));
}

#[test]
fn create_task_targets_explicit_project_over_current() {
    let mut store = board();
    let first = store.create_project("First").unwrap();
    let second = store.create_project("Second").unwrap();

    store
        .create_task(Some(first), "in first", "", TaskStatus::Pending)
        .unwrap();
    assert_eq!(store.project(first).unwrap().tasks.len(), 1);
    assert!(store.project(second).unwrap().tasks.is_empty());
}

#[test]
fn create_task_without_project_reports_missing_selection() {
    let mut store = board();
    let err = store
        .create_task(None, "orphan", "", TaskStatus::Pending)
        .unwrap_err();
    assert_eq!(err, BoardError::NoProjectSelected);
    assert!(!err.is_not_found());
}

#[test]
fn create_task_rejects_blank_title_and_unknown_project() {
    let mut store = board();
    let project = store.create_project("Work").unwrap();

    let err = store
        .create_task(None, "   ", "desc", TaskStatus::Pending)
        .unwrap_err();
    assert_eq!(err, BoardError::Validation(ValidationError::EmptyTaskTitle));
    assert!(store.project(project).unwrap().tasks.is_empty());

    let missing = taskboard_core::ProjectId(1);
    let err = store
        .create_task(Some(missing), "title", "", TaskStatus::Pending)
        .unwrap_err();
    assert_eq!(err, BoardError::ProjectNotFound(missing));
    assert!(err.is_not_found());
}

#[test]
fn task_ids_are_unique_when_created_back_to_back() {
    let mut store = board();
    store.create_project("Work").unwrap();
    let ids = (0..50)
        .map(|n| {
            store
                .create_task(None, &format!("task {n}"), "", TaskStatus::Pending)
                .unwrap()
        })
        .collect::<std::collections::HashSet<_>>();
    assert_eq!(ids.len(), 50);
}

#[test]
fn delete_project_cascades_and_reselects_first_remaining() {
    let mut store = board();
    let keep = store.create_project("Keep").unwrap();
    let doomed = store.create_project("Doomed").unwrap();
    let task = store
        .create_task(Some(doomed), "gone", "", TaskStatus::Pending)
        .unwrap();
    store.add_note(task, "note").unwrap();
    store.open_notes(task).unwrap();
    store.begin_edit(task).unwrap();

    store.delete_project(doomed).unwrap();

    assert!(store.project(doomed).is_none());
    assert!(store.task(task).is_none());
    assert_eq!(store.current_project_id(), Some(keep));
    assert_eq!(store.notes_task_id(), None);
    assert_eq!(store.edit_mode(), EditMode::Idle);
    assert_eq!(
        store.add_note(task, "late").unwrap_err(),
        BoardError::TaskNotFound(task)
    );
}

#[test]
fn deleting_last_project_clears_current_selection() {
    let mut store = board();
    let only = store.create_project("Only").unwrap();
    store.delete_project(only).unwrap();
    assert_eq!(store.current_project_id(), None);
    assert!(store.current_project().is_none());
    assert_eq!(
        store.delete_project(only).unwrap_err(),
        BoardError::ProjectNotFound(only)
    );
}

#[test]
fn update_task_validates_before_applying() {
    let mut store = board();
    store.create_project("Work").unwrap();
    let task = store
        .create_task(None, "draft", "", TaskStatus::Pending)
        .unwrap();

    let err = store
        .update_task(
            task,
            TaskUpdate {
                title: String::new(),
                description: "changed".to_string(),
                status: TaskStatus::Completed,
            },
        )
        .unwrap_err();
    assert!(matches!(err, BoardError::Validation(_)));
    let unchanged = store.task(task).unwrap();
    assert_eq!(unchanged.description, "");
    assert_eq!(unchanged.status, TaskStatus::Pending);

    store
        .update_task(
            task,
            TaskUpdate {
                title: "final".to_string(),
                description: " body ".to_string(),
                status: TaskStatus::Completed,
            },
        )
        .unwrap();
    let updated = store.task(task).unwrap();
    assert_eq!(updated.title, "final");
    assert_eq!(updated.description, "body");
    assert!(updated.is_completed());
}

#[test]
fn edit_mode_round_trip_returns_to_idle() {
    let mut store = board();
    store.create_project("Work").unwrap();
    let task = store
        .create_task(None, "draft", "", TaskStatus::Pending)
        .unwrap();

    store.begin_edit(task).unwrap();
    assert_eq!(store.edit_mode(), EditMode::Editing(task));
    store.cancel_edit();
    assert_eq!(store.edit_mode(), EditMode::Idle);

    store.begin_edit(task).unwrap();
    let edited = store
        .submit_edit(TaskUpdate {
            title: "done".to_string(),
            description: String::new(),
            status: TaskStatus::Completed,
        })
        .unwrap();
    assert_eq!(edited, task);
    assert_eq!(store.edit_mode(), EditMode::Idle);
}

#[test]
fn set_task_status_moves_between_buckets() {
    let mut store = board();
    let project = store.create_project("Work").unwrap();
    let task = store
        .create_task(None, "move me", "", TaskStatus::Pending)
        .unwrap();

    store.set_task_status(task, TaskStatus::Completed).unwrap();

    let owner = store.project(project).unwrap();
    assert_eq!(owner.tasks_with_status(TaskStatus::Pending).count(), 0);
    assert_eq!(owner.tasks_with_status(TaskStatus::Completed).count(), 1);
    assert_eq!(persisted(&store)[0]["tasks"][0]["status"], "completed");
}

#[test]
fn notes_append_and_remove_by_index() {
    let mut store = board();
    store.create_project("Work").unwrap();
    let task = store
        .create_task(None, "annotated", "", TaskStatus::Pending)
        .unwrap();

    assert_eq!(store.add_note(task, "first").unwrap(), 0);
    assert_eq!(store.add_note(task, " second ").unwrap(), 1);
    assert_eq!(
        store.add_note(task, "  ").unwrap_err(),
        BoardError::Validation(ValidationError::EmptyNote)
    );

    assert_eq!(store.remove_note(task, 0).unwrap(), "first");
    assert_eq!(store.task(task).unwrap().notes, vec!["second".to_string()]);
    assert_eq!(
        store.remove_note(task, 5).unwrap_err(),
        BoardError::NoteNotFound { task_id: task, index: 5 }
    );
}

#[test]
fn deleting_task_bound_to_notes_editor_clears_binding() {
    let mut store = board();
    store.create_project("Work").unwrap();
    let task = store
        .create_task(None, "with notes", "", TaskStatus::Pending)
        .unwrap();
    store.open_notes(task).unwrap();
    store.add_note_to_open_task("kept").unwrap();

    store.delete_task(task).unwrap();

    assert_eq!(store.notes_task_id(), None);
    assert_eq!(
        store.add_note_to_open_task("orphan note").unwrap_err(),
        BoardError::NoTaskSelected
    );
}

#[test]
fn deleting_other_task_keeps_notes_binding() {
    let mut store = board();
    store.create_project("Work").unwrap();
    let bound = store
        .create_task(None, "bound", "", TaskStatus::Pending)
        .unwrap();
    let other = store
        .create_task(None, "other", "", TaskStatus::Pending)
        .unwrap();
    store.open_notes(bound).unwrap();

    store.delete_task(other).unwrap();
    assert_eq!(store.notes_task_id(), Some(bound));
    store.close_notes();
    assert_eq!(store.notes_task_id(), None);
}
