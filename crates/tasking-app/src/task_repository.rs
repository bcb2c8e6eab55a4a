//! In-memory snapshot cache over a task store.

use anyhow::{Context, Result, bail};
use tasking_core::{Task, TaskId, TaskState, sort_by_id};

use crate::task_store::TaskStore;

/// Repository owning the full snapshot of persisted tasks.
///
/// The cache is replaced wholesale after every create, delete, and import;
/// state cycling patches only the affected entry in place and skips the
/// reload.
pub struct TaskRepository<S> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: TaskStore> TaskRepository<S> {
    /// Create a repository and eagerly load the snapshot.
    ///
    /// # Errors
    /// Returns an error if the initial load fails.
    pub fn new(store: S) -> Result<Self> {
        let mut repo = Self {
            store,
            tasks: Vec::new(),
        };
        repo.load()?;
        Ok(repo)
    }

    /// Reload the whole snapshot from storage, sorted ascending by id.
    ///
    /// # Errors
    /// Returns an error if the query fails; the previous snapshot is kept.
    pub fn load(&mut self) -> Result<()> {
        let mut tasks = self
            .store
            .select_all()
            .map_err(Into::into)
            .context("failed to load tasks")?;
        sort_by_id(&mut tasks);
        self.tasks = tasks;
        Ok(())
    }

    /// Current snapshot, ordered ascending by id.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a cached task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Insert a new pending task from user text and reload.
    ///
    /// # Errors
    /// Returns an error when the text is empty after trimming or the insert
    /// fails.
    pub fn create(&mut self, text: &str) -> Result<TaskId> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            bail!("task text must not be empty");
        }
        let id = self
            .store
            .insert(trimmed, TaskState::Pending)
            .map_err(Into::into)
            .context("failed to insert task")?;
        self.load()?;
        Ok(id)
    }

    /// Replace text and state of an existing task and reload.
    ///
    /// # Errors
    /// Returns an error when the update statement or the reload fails.
    pub fn update(&mut self, id: TaskId, text: &str, state: TaskState) -> Result<bool> {
        let changed = self
            .store
            .update(id, text, state)
            .map_err(Into::into)
            .context("failed to update task")?;
        if changed {
            self.load()?;
        }
        Ok(changed)
    }

    /// Advance the task's state one step, persisting and patching the cached
    /// entry in place. No reload happens here.
    ///
    /// Returns the new state, or `None` when the id is unknown.
    ///
    /// # Errors
    /// Returns an error when persisting the new state fails; the cache is
    /// left untouched in that case.
    pub fn cycle_state(&mut self, id: TaskId) -> Result<Option<TaskState>> {
        let Some(pos) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(None);
        };
        let next = self.tasks[pos].state.cycle();
        let text = self.tasks[pos].text.clone();
        let changed = self
            .store
            .update(id, &text, next)
            .map_err(Into::into)
            .context("failed to persist cycled state")?;
        if !changed {
            return Ok(None);
        }
        self.tasks[pos].state = next;
        Ok(Some(next))
    }

    /// Delete a task and reload. Deleting a missing id is a quiet no-op.
    ///
    /// # Errors
    /// Returns an error when the delete statement or the reload fails.
    pub fn delete(&mut self, id: TaskId) -> Result<bool> {
        let removed = self
            .store
            .remove(id)
            .map_err(Into::into)
            .context("failed to delete task")?;
        self.load()?;
        Ok(removed)
    }
}
