//! SQLite-backed storage for tasking.

use rusqlite::{Connection, params};
use std::path::Path;
use tracing::debug;

use tasking_core::{Task, TaskId, TaskState};

mod error;

pub use error::StoreError;

/// Storage based on a single `tasks` table in an embedded SQLite database.
///
/// Every method is its own unit of work: no statement spans another, and the
/// connection's implicit transaction handling is relied upon as-is. Callers
/// decide what to do with a failure; the store never retries.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the table exists.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self { conn };
        store.create_table()?;
        Ok(store)
    }

    /// Open an in-memory database, mainly for tests.
    ///
    /// # Errors
    /// Returns an error if the connection or schema creation fails.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.create_table()?;
        Ok(store)
    }

    /// Create the `tasks` table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when the DDL statement fails.
    pub fn create_table(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                state INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Drop the `tasks` table. A missing table is not an error.
    ///
    /// # Errors
    /// Returns an error when the DDL statement fails.
    pub fn drop_table(&self) -> Result<(), StoreError> {
        self.conn.execute("DROP TABLE IF EXISTS tasks", [])?;
        debug!("dropped tasks table");
        Ok(())
    }

    /// Insert a task and return the storage-assigned id.
    ///
    /// # Errors
    /// Returns an error when the insert fails.
    pub fn insert(&self, text: &str, state: TaskState) -> Result<TaskId, StoreError> {
        self.conn.execute(
            "INSERT INTO tasks (text, state) VALUES (?1, ?2)",
            params![text, state.as_i64()],
        )?;
        let id = TaskId(self.conn.last_insert_rowid());
        debug!(%id, "inserted task");
        Ok(id)
    }

    /// Update text and state of a task. Returns `false` when no row matched.
    ///
    /// # Errors
    /// Returns an error when the update statement fails.
    pub fn update(&self, id: TaskId, text: &str, state: TaskState) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET text = ?1, state = ?2 WHERE id = ?3",
            params![text, state.as_i64(), id.value()],
        )?;
        debug!(%id, changed, "updated task");
        Ok(changed > 0)
    }

    /// Delete a task. Returns `false` when no row matched; other rows are
    /// never touched.
    ///
    /// # Errors
    /// Returns an error when the delete statement fails.
    pub fn remove(&self, id: TaskId) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id.value()])?;
        debug!(%id, changed, "removed task");
        Ok(changed > 0)
    }

    /// Load every row of the table, in storage order.
    ///
    /// Raw state values are clamped into the tri-state on decode.
    ///
    /// # Errors
    /// Returns an error when the query fails.
    pub fn select_all(&self) -> Result<Vec<Task>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT id, text, state FROM tasks")?;
        let rows = stmt.query_map([], |row| {
            Ok(Task::from_row(row.get(0)?, row.get(1)?, row.get(2)?))
        })?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }
}
