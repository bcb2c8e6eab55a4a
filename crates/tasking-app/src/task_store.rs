//! Storage seam shared by the repository, CLI, and TUI.

use std::sync::Arc;

use anyhow::Error;
use tasking_core::{Task, TaskId, TaskState};
use tasking_store_sqlite::{SqliteStore, StoreError};

/// Contract of the storage adapter.
///
/// Mirrors the `tasks` table operations one-to-one so repository and
/// controller code can be unit-tested against mock stores. Each call is its
/// own unit of work; implementations never retry.
pub trait TaskStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Create the `tasks` table if absent.
    ///
    /// # Errors
    /// Returns a store-specific error when schema creation fails.
    fn create_table(&self) -> Result<(), Self::Error>;

    /// Drop the `tasks` table; a missing table is not an error.
    ///
    /// # Errors
    /// Returns a store-specific error when the drop fails.
    fn drop_table(&self) -> Result<(), Self::Error>;

    /// Insert a task, returning the storage-assigned id.
    ///
    /// # Errors
    /// Returns a store-specific error when the insert fails.
    fn insert(&self, text: &str, state: TaskState) -> Result<TaskId, Self::Error>;

    /// Update a task's text and state. `false` when no row matched.
    ///
    /// # Errors
    /// Returns a store-specific error when the update fails.
    fn update(&self, id: TaskId, text: &str, state: TaskState) -> Result<bool, Self::Error>;

    /// Delete a task. `false` when no row matched.
    ///
    /// # Errors
    /// Returns a store-specific error when the delete fails.
    fn remove(&self, id: TaskId) -> Result<bool, Self::Error>;

    /// Load every persisted task.
    ///
    /// # Errors
    /// Returns a store-specific error when the query fails.
    fn select_all(&self) -> Result<Vec<Task>, Self::Error>;
}

impl TaskStore for SqliteStore {
    type Error = StoreError;

    fn create_table(&self) -> Result<(), Self::Error> {
        Self::create_table(self)
    }

    fn drop_table(&self) -> Result<(), Self::Error> {
        Self::drop_table(self)
    }

    fn insert(&self, text: &str, state: TaskState) -> Result<TaskId, Self::Error> {
        Self::insert(self, text, state)
    }

    fn update(&self, id: TaskId, text: &str, state: TaskState) -> Result<bool, Self::Error> {
        Self::update(self, id, text, state)
    }

    fn remove(&self, id: TaskId) -> Result<bool, Self::Error> {
        Self::remove(self, id)
    }

    fn select_all(&self) -> Result<Vec<Task>, Self::Error> {
        Self::select_all(self)
    }
}

impl<S: TaskStore> TaskStore for Arc<S> {
    type Error = S::Error;

    fn create_table(&self) -> Result<(), Self::Error> {
        S::create_table(self)
    }

    fn drop_table(&self) -> Result<(), Self::Error> {
        S::drop_table(self)
    }

    fn insert(&self, text: &str, state: TaskState) -> Result<TaskId, Self::Error> {
        S::insert(self, text, state)
    }

    fn update(&self, id: TaskId, text: &str, state: TaskState) -> Result<bool, Self::Error> {
        S::update(self, id, text, state)
    }

    fn remove(&self, id: TaskId) -> Result<bool, Self::Error> {
        S::remove(self, id)
    }

    fn select_all(&self) -> Result<Vec<Task>, Self::Error> {
        S::select_all(self)
    }
}
