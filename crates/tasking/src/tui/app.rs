use anyhow::Result;

use tasking_app::{ImportBatch, ImportReport, TaskRepository, TaskStore};
use tasking_core::{Task, TaskId, TaskState};

/// One rendered row of the task list.
///
/// The renderer consumes this plain descriptor sequence; nothing else about
/// the repository leaks into the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct TaskRow<'a> {
    /// Storage-assigned id.
    pub id: TaskId,
    /// Status glyph for the row.
    pub glyph: &'static str,
    /// Task text.
    pub text: &'a str,
}

/// Application state shared between the TUI event loop and rendering.
pub(super) struct App<S: TaskStore> {
    repo: TaskRepository<S>,
    /// Current selection (index into the id-ordered snapshot).
    pub(super) selected: usize,
}

impl<S: TaskStore> App<S> {
    pub(super) const fn new(repo: TaskRepository<S>) -> Self {
        Self { repo, selected: 0 }
    }

    pub(super) fn tasks(&self) -> &[Task] {
        self.repo.tasks()
    }

    pub(super) fn has_tasks(&self) -> bool {
        !self.repo.tasks().is_empty()
    }

    /// Ordered row descriptors for the renderer.
    pub(super) fn rows(&self) -> impl Iterator<Item = TaskRow<'_>> {
        self.repo.tasks().iter().map(|task| TaskRow {
            id: task.id,
            glyph: task.state.glyph(),
            text: &task.text,
        })
    }

    /// Selected task (if any).
    pub(super) fn selected_task(&self) -> Option<&Task> {
        self.repo.tasks().get(self.selected)
    }

    /// Move selection to the next task.
    pub(super) fn select_next(&mut self) {
        if self.has_tasks() && self.selected + 1 < self.repo.tasks().len() {
            self.selected += 1;
        }
    }

    /// Move selection to the previous task.
    pub(super) fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Reload from storage and keep the selection in bounds.
    pub(super) fn refresh(&mut self) -> Result<()> {
        let keep_id = self.selected_task().map(|task| task.id);
        self.repo.load()?;
        self.restore_selection(keep_id);
        Ok(())
    }

    /// Insert a new pending task and select it.
    pub(super) fn create_task(&mut self, text: &str) -> Result<TaskId> {
        let id = self.repo.create(text)?;
        self.restore_selection(Some(id));
        Ok(id)
    }

    /// Cycle the selected task's state in place.
    pub(super) fn cycle_selected(&mut self) -> Result<Option<TaskState>> {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            return Ok(None);
        };
        self.repo.cycle_state(id)
    }

    /// Delete the selected task; returns its id when something was removed.
    pub(super) fn delete_selected(&mut self) -> Result<Option<TaskId>> {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            return Ok(None);
        };
        let removed = self.repo.delete(id)?;
        self.clamp_selection();
        Ok(removed.then_some(id))
    }

    /// Replace all tasks from an import batch.
    pub(super) fn import_replace(&mut self, batch: &ImportBatch) -> Result<ImportReport> {
        let report = self.repo.import_replace(batch)?;
        self.clamp_selection();
        Ok(report)
    }

    fn restore_selection(&mut self, preferred: Option<TaskId>) {
        if let Some(index) = preferred
            .and_then(|id| self.repo.tasks().iter().position(|task| task.id == id))
        {
            self.selected = index;
        } else {
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.repo.tasks().len();
        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use tasking_store_sqlite::SqliteStore;

    fn app() -> App<SqliteStore> {
        let store = SqliteStore::open_in_memory().expect("open store");
        let repo = TaskRepository::new(store).expect("build repository");
        App::new(repo)
    }

    #[test]
    fn selection_stays_in_bounds_across_mutations() {
        let mut app = app();
        app.create_task("a").expect("create");
        app.create_task("b").expect("create");
        app.create_task("c").expect("create");
        assert_eq!(app.selected, 2);

        app.delete_selected().expect("delete");
        assert_eq!(app.selected, 1);
        app.delete_selected().expect("delete");
        app.delete_selected().expect("delete");
        assert_eq!(app.selected, 0);
        assert!(!app.has_tasks());
        assert!(app.delete_selected().expect("delete").is_none());
    }

    #[test]
    fn select_next_and_prev_clamp_at_the_edges() {
        let mut app = app();
        app.select_prev();
        app.select_next();
        assert_eq!(app.selected, 0);

        app.create_task("a").expect("create");
        app.create_task("b").expect("create");
        app.selected = 0;
        app.select_prev();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn rows_follow_id_order_with_glyphs() {
        let mut app = app();
        app.create_task("first").expect("create");
        app.create_task("second").expect("create");
        app.selected = 1;
        app.cycle_selected().expect("cycle");

        let rows: Vec<(&str, &str)> = app.rows().map(|row| (row.glyph, row.text)).collect();
        assert_eq!(rows, vec![("❔", "first"), ("〰️", "second")]);
    }

    #[test]
    fn refresh_keeps_the_selected_task() {
        let mut app = app();
        app.create_task("a").expect("create");
        let kept = app.create_task("b").expect("create");
        app.create_task("c").expect("create");
        app.selected = 1;

        app.refresh().expect("refresh");
        assert_eq!(app.selected_task().map(|task| task.id), Some(kept));
    }
}
