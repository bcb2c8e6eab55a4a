//! CLI entry point for tasking.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use config::Config;
use tasking_app::TaskRepository;
use tasking_core::{TaskId, TaskState};
use tasking_store_sqlite::SqliteStore;

mod commands;
mod config;
mod tui;

/// A single-pane task list backed by SQLite.
#[derive(Parser, Debug)]
#[command(
    name = "tasking",
    version,
    about = "tasking: a single-pane task list backed by SQLite"
)]
struct Cli {
    /// Path to the database file (defaults to the configured location).
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new pending task.
    Add {
        /// Task text; leading and trailing whitespace is trimmed.
        text: String,
    },

    /// List all tasks, ordered by id.
    Ls,

    /// Set the state of a task.
    SetState {
        #[arg(long)]
        id: TaskId,
        /// pending, in_progress, done, or 0..=2.
        #[arg(long)]
        state: TaskState,
    },

    /// Advance the state of a task one step in the cycle.
    Cycle {
        #[arg(long)]
        id: TaskId,
    },

    /// Delete a task.
    Rm {
        #[arg(long)]
        id: TaskId,
    },

    /// Export all tasks as `<epoch-ms>.json`.
    Export {
        /// Target directory (defaults to the configured export directory).
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Replace all tasks from a JSON file.
    Import {
        /// JSON array of objects with `text` and `state` keys.
        file: PathBuf,
    },

    /// Launch interactive terminal UI.
    Tui,
}

fn main() -> Result<()> {
    let Cli { db, cmd } = Cli::parse();

    install_tracing();

    let config = Config::load(None)?;
    let db_path = config.resolve_db_path(db)?;
    execute_command(&db_path, config, cmd)
}

fn execute_command(db_path: &Path, config: Config, command: Command) -> Result<()> {
    let store = SqliteStore::open(db_path)?;
    match command {
        Command::Tui => tui::run(store, config),
        other => {
            let mut repository = TaskRepository::new(store)?;
            commands::run(other, &mut repository, &config)
        }
    }
}

fn install_tracing() {
    // RUST_LOG overrides the default of INFO.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_command() {
        let cli = Cli::parse_from(["tasking", "--db", "tasks.db3", "add", "Buy milk"]);
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("tasks.db3")));
        match cli.cmd {
            Command::Add { text } => assert_eq!(text, "Buy milk"),
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn parse_set_state_command() {
        let cli = Cli::parse_from(["tasking", "set-state", "--id", "3", "--state", "in_progress"]);
        match cli.cmd {
            Command::SetState { id, state } => {
                assert_eq!(id, TaskId(3));
                assert_eq!(state, TaskState::InProgress);
            }
            _ => panic!("expected set-state command"),
        }
    }

    #[test]
    fn parse_state_accepts_digits() {
        let cli = Cli::parse_from(["tasking", "set-state", "--id", "1", "--state", "2"]);
        match cli.cmd {
            Command::SetState { state, .. } => assert_eq!(state, TaskState::Done),
            _ => panic!("expected set-state command"),
        }
    }

    #[test]
    fn parse_tui_command() {
        let cli = Cli::parse_from(["tasking", "tui"]);
        match cli.cmd {
            Command::Tui => {}
            _ => panic!("expected tui command"),
        }
    }

    #[test]
    fn parse_export_with_dir() {
        let cli = Cli::parse_from(["tasking", "export", "--dir", "/tmp"]);
        match cli.cmd {
            Command::Export { dir } => {
                assert_eq!(dir.as_deref(), Some(std::path::Path::new("/tmp")));
            }
            _ => panic!("expected export command"),
        }
    }
}
