use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use tasking_app::{TaskRepository, TaskStore, parse_import, write_export};
use tasking_core::Task;

use crate::Command;
use crate::config::Config;

/// Dispatch a non-interactive command against the repository.
pub fn run<S: TaskStore>(
    command: Command,
    repository: &mut TaskRepository<S>,
    config: &Config,
) -> Result<()> {
    match command {
        Command::Add { text } => {
            let id = repository.create(&text)?;
            println!("created task: {id}");
        }

        Command::Ls => {
            if repository.tasks().is_empty() {
                println!("No tasks");
                return Ok(());
            }
            for task in repository.tasks() {
                println!("{}", render_row(task));
            }
        }

        Command::SetState { id, state } => {
            let Some(task) = repository.get(id) else {
                anyhow::bail!("no such task: {id}");
            };
            let text = task.text.clone();
            repository.update(id, &text, state)?;
            println!("task {id} is now {}", state.as_str());
        }

        Command::Cycle { id } => match repository.cycle_state(id)? {
            Some(state) => println!("task {id} is now {}", state.as_str()),
            None => anyhow::bail!("no such task: {id}"),
        },

        Command::Rm { id } => {
            if repository.delete(id)? {
                println!("deleted task: {id}");
            } else {
                println!("no such task: {id}");
            }
        }

        Command::Export { dir } => {
            let dir = resolve_export_dir(dir, config);
            let path = write_export(&dir, repository.tasks())?;
            println!("exported {} tasks to {}", repository.tasks().len(), path.display());
        }

        Command::Import { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let batch = parse_import(&raw)?;
            let report = repository.import_replace(&batch)?;
            println!("imported {} tasks ({} skipped)", report.inserted, report.skipped);
        }

        Command::Tui => unreachable!("tui command is routed before the handlers"),
    }

    Ok(())
}

fn resolve_export_dir(cli_override: Option<PathBuf>, config: &Config) -> PathBuf {
    cli_override.unwrap_or_else(|| config.resolve_export_dir())
}

fn render_row(task: &Task) -> String {
    format!("{} {} ({})", task.state.glyph(), task.text, task.id)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use tasking_core::{TaskId, TaskState};
    use tasking_store_sqlite::SqliteStore;
    use tempfile::TempDir;

    fn repository() -> TaskRepository<SqliteStore> {
        let store = SqliteStore::open_in_memory().expect("open store");
        TaskRepository::new(store).expect("build repository")
    }

    #[test]
    fn run_add_inserts_pending_task() {
        let mut repo = repository();
        run(
            Command::Add {
                text: "  via run  ".into(),
            },
            &mut repo,
            &Config::default(),
        )
        .expect("run add");

        assert_eq!(repo.tasks().len(), 1);
        assert_eq!(repo.tasks()[0].text, "via run");
        assert_eq!(repo.tasks()[0].state, TaskState::Pending);
    }

    #[test]
    fn run_set_state_rejects_unknown_id() {
        let mut repo = repository();
        let result = run(
            Command::SetState {
                id: TaskId(42),
                state: TaskState::Done,
            },
            &mut repo,
            &Config::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn run_rm_on_missing_id_is_not_an_error() {
        let mut repo = repository();
        run(
            Command::Rm { id: TaskId(42) },
            &mut repo,
            &Config::default(),
        )
        .expect("run rm");
    }

    #[test]
    fn run_export_then_import_roundtrips() {
        let dir = TempDir::new().expect("create temp dir");
        let mut repo = repository();
        repo.create("A").expect("create");
        let id = repo.create("B").expect("create");
        repo.update(id, "B", TaskState::Done).expect("update");

        run(
            Command::Export {
                dir: Some(dir.path().to_path_buf()),
            },
            &mut repo,
            &Config::default(),
        )
        .expect("run export");

        let exported = std::fs::read_dir(dir.path())
            .expect("read dir")
            .next()
            .expect("one export file")
            .expect("dir entry")
            .path();

        run(
            Command::Import { file: exported },
            &mut repo,
            &Config::default(),
        )
        .expect("run import");

        let pairs: Vec<(&str, TaskState)> = repo
            .tasks()
            .iter()
            .map(|t| (t.text.as_str(), t.state))
            .collect();
        assert_eq!(pairs, vec![("A", TaskState::Pending), ("B", TaskState::Done)]);
    }

    #[test]
    fn render_row_shows_glyph_text_and_id() {
        let task = Task {
            id: TaskId(3),
            text: "Buy milk".into(),
            state: TaskState::Pending,
        };
        assert_eq!(render_row(&task), "❔ Buy milk (3)");
    }
}
