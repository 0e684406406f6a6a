use taskboard_core::render::board_view::Progress;
use taskboard_core::{
    render_board, render_todos, BoardStore, MemoryKvStore, TaskStatus, TodoFilter, TodoStore,
};

#[test]
fn board_without_projects_renders_empty_columns_and_zero_progress() {
    let store = BoardStore::load(MemoryKvStore::new());
    let view = render_board(&store);

    assert!(view.projects.is_empty());
    let statuses = view.columns.iter().map(|c| c.status).collect::<Vec<_>>();
    assert_eq!(statuses, TaskStatus::ALL.to_vec());
    assert!(view.columns.iter().all(|column| column.cards.is_empty()));
    assert_eq!(view.progress, Progress::default());
    assert!(view.to_html().contains("0% Completed"));
}

#[test]
fn board_columns_bucket_tasks_by_status_in_insertion_order() {
    let mut store = BoardStore::load(MemoryKvStore::new());
    store.create_project("Work").unwrap();
    for (title, status) in [
        ("a", TaskStatus::Pending),
        ("b", TaskStatus::Completed),
        ("c", TaskStatus::Pending),
        ("d", TaskStatus::InProgress),
    ] {
        store.create_task(None, title, "", status).unwrap();
    }

    let view = render_board(&store);
    let titles = |status| {
        view.column(status)
            .unwrap()
            .cards
            .iter()
            .map(|card| card.title.as_str())
            .collect::<Vec<_>>()
    };
    assert_eq!(titles(TaskStatus::Pending), vec!["a", "c"]);
    assert_eq!(titles(TaskStatus::InProgress), vec!["d"]);
    assert_eq!(titles(TaskStatus::Completed), vec!["b"]);
    assert_eq!(view.progress.percent, 25);
}

#[test]
fn progress_follows_current_project_only() {
    let mut store = BoardStore::load(MemoryKvStore::new());
    let first = store.create_project("First").unwrap();
    for status in [TaskStatus::Completed, TaskStatus::Pending, TaskStatus::Pending] {
        store.create_task(Some(first), "t", "", status).unwrap();
    }
    store.create_project("Second").unwrap();
    assert_eq!(render_board(&store).progress.percent, 0);

    store.select_project(first).unwrap();
    let progress = render_board(&store).progress;
    assert_eq!((progress.completed, progress.total, progress.percent), (1, 3, 33));
}

#[test]
fn board_markup_escapes_user_text() {
    let mut store = BoardStore::load(MemoryKvStore::new());
    store.create_project("<img src=x onerror=alert(1)>").unwrap();
    let task = store
        .create_task(None, "<script>alert('x')</script>", "a & \"b\"", TaskStatus::Pending)
        .unwrap();
    store.open_notes(task).unwrap();
    store.add_note(task, "<b>bold</b>").unwrap();

    let html = render_board(&store).to_html();
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img"));
    assert!(!html.contains("<b>bold"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(html.contains("a &amp; &quot;b&quot;"));
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
}

#[test]
fn notes_panel_without_binding_shows_placeholder() {
    let store = BoardStore::load(MemoryKvStore::new());
    let view = render_board(&store);
    assert!(!view.notes.visible);
    assert!(view.to_html().contains("No task selected."));
}

#[test]
fn todo_markup_escapes_text_and_flags_rows() {
    let mut store = TodoStore::load(MemoryKvStore::new());
    let id = store.create_todo("<script>steal()</script>").unwrap();
    store.toggle_todo(id).unwrap();
    store.begin_remove(id).unwrap();

    let view = render_todos(&store);
    assert_eq!(view.rows.len(), 1);
    assert!(view.rows[0].completed && view.rows[0].removing);

    let html = view.to_html();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;steal()&lt;/script&gt;"));
    assert!(html.contains("todo-item completed removing"));
    assert!(html.contains(" checked"));
}

#[test]
fn todo_view_defaults_to_all_filter() {
    let store = TodoStore::load(MemoryKvStore::new());
    let view = render_todos(&store);
    assert!(view.empty);
    assert_eq!(view.active_filter(), Some(TodoFilter::All));
    assert_eq!(view.empty_message, "No tasks yet. Add one above!");
}
