//! Application layer logic for tasking.
//!
//! This crate provides the storage seam, the in-memory snapshot repository,
//! and JSON import/export shared by the CLI and TUI.

pub mod task_repository;
pub mod task_store;
pub mod transfer;

// Re-exports for convenience
pub use task_repository::TaskRepository;
pub use task_store::TaskStore;
pub use transfer::{
    ImportBatch, ImportRecord, ImportReport, TransferError, export_file_name, export_json,
    parse_import, write_export,
};
