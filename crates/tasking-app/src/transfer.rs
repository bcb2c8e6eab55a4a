//! JSON export and bulk-replace import.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{error, warn};

use tasking_core::{Task, TaskState};

use crate::task_repository::TaskRepository;
use crate::task_store::TaskStore;

/// A validated import row: text plus state, ids are never imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// Task text.
    pub text: String,
    /// Task status, clamped from the raw integer.
    pub state: TaskState,
}

/// Result of parsing an import payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBatch {
    /// Rows that carried both required keys.
    pub records: Vec<ImportRecord>,
    /// Elements dropped for missing or mistyped keys.
    pub skipped: usize,
}

/// Outcome of a bulk-replace import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows inserted into the recreated table.
    pub inserted: usize,
    /// Elements skipped during parsing or insertion.
    pub skipped: usize,
}

/// Errors raised while reading an import payload.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Payload was not valid JSON.
    #[error("import payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload parsed, but the top level was not an array.
    #[error("import payload must be a JSON array of tasks")]
    NotAnArray,
}

/// Parse an import payload.
///
/// Each element must be an object carrying a string `"text"` and an integer
/// `"state"`; anything else is silently skipped and counted. Unrecognized
/// fields are ignored.
///
/// # Errors
/// Returns an error when the payload is not a JSON array at all.
pub fn parse_import(raw: &str) -> Result<ImportBatch, TransferError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = value else {
        return Err(TransferError::NotAnArray);
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for item in items {
        let text = item.get("text").and_then(Value::as_str);
        let state = item.get("state").and_then(Value::as_i64);
        match (text, state) {
            (Some(text), Some(state)) => records.push(ImportRecord {
                text: text.to_owned(),
                state: TaskState::from(state),
            }),
            _ => skipped += 1,
        }
    }
    Ok(ImportBatch { records, skipped })
}

/// Serialize the snapshot, ids included, as the export wire format.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn export_json(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).context("failed to serialize tasks")
}

/// Export file name: current epoch milliseconds plus `.json`.
#[must_use]
pub fn export_file_name() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("{millis}.json")
}

/// Write the snapshot into `dir` under a timestamp-derived name.
///
/// # Errors
/// Returns an error when serialization or the file write fails.
pub fn write_export(dir: &Path, tasks: &[Task]) -> Result<PathBuf> {
    let path = dir.join(export_file_name());
    let payload = export_json(tasks)?;
    fs::write(&path, payload).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

impl<S: TaskStore> TaskRepository<S> {
    /// Replace the whole table with the batch: drop, recreate, insert each
    /// record in order, then reload.
    ///
    /// A failed insert is logged and skipped; partial import is an accepted
    /// outcome and nothing is rolled back. Ids are reassigned by storage.
    ///
    /// # Errors
    /// Returns an error when the drop, recreate, or final reload fails.
    pub fn import_replace(&mut self, batch: &ImportBatch) -> Result<ImportReport> {
        if batch.skipped > 0 {
            warn!(skipped = batch.skipped, "import elements missing text or state");
        }
        self.store()
            .drop_table()
            .map_err(Into::into)
            .context("failed to drop tasks table")?;
        self.store()
            .create_table()
            .map_err(Into::into)
            .context("failed to recreate tasks table")?;

        let mut inserted = 0usize;
        let mut failed = 0usize;
        for record in &batch.records {
            match self.store().insert(&record.text, record.state) {
                Ok(_) => inserted += 1,
                Err(err) => {
                    failed += 1;
                    let err: anyhow::Error = err.into();
                    error!("failed to insert imported task: {err:#}");
                }
            }
        }

        self.load()?;
        Ok(ImportReport {
            inserted,
            skipped: batch.skipped + failed,
        })
    }
}
