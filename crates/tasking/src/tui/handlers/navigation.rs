use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::error;

use tasking_app::{TaskStore, write_export};

use super::super::view::{DialogKind, DialogState, Ui};
use crate::config::{Action, ViewType};

impl<S: TaskStore> Ui<S> {
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Shortcuts are active only while no dialog is open.
        if self.dialog.is_some() {
            self.handle_dialog_key(key);
        } else {
            self.handle_task_list_key(key);
        }
    }

    fn handle_task_list_key(&mut self, key: KeyEvent) {
        if self.keybindings.matches(ViewType::TaskList, Action::Quit, &key) {
            self.should_quit = true;
            return;
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Down, &key) {
            self.app.select_next();
            return;
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Up, &key) {
            self.app.select_prev();
            return;
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Refresh, &key) {
            match self.app.refresh() {
                Ok(()) => self.info("reloaded tasks"),
                Err(err) => {
                    error!("failed to reload tasks: {err:#}");
                    self.error(format!("failed to reload tasks: {err:#}"));
                }
            }
            return;
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::CycleState, &key)
        {
            // The glyph in the row is patched in place; no reload, no message.
            if let Err(err) = self.app.cycle_selected() {
                error!("failed to cycle task state: {err:#}");
                self.error(format!("failed to cycle task state: {err:#}"));
            }
            return;
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::DeleteTask, &key)
        {
            match self.app.delete_selected() {
                Ok(Some(id)) => self.info(format!("deleted task {id}")),
                Ok(None) => {}
                Err(err) => {
                    error!("failed to delete task: {err:#}");
                    self.error(format!("failed to delete task: {err:#}"));
                }
            }
            return;
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::CopyText, &key)
        {
            self.copy_selected_text();
            return;
        }

        if self
            .keybindings
            .matches(ViewType::TaskList, Action::CreateTask, &key)
        {
            self.dialog = Some(DialogState::new(DialogKind::AddTask));
            return;
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Import, &key) {
            self.dialog = Some(DialogState::new(DialogKind::ImportPath));
            return;
        }

        if self.keybindings.matches(ViewType::TaskList, Action::Export, &key) {
            self.export_tasks();
        }
    }

    fn copy_selected_text(&mut self) {
        let Some(text) = self.app.selected_task().map(|task| task.text.clone()) else {
            self.error("no task selected to copy");
            return;
        };

        if let Err(err) = self.clipboard.set_text(&text) {
            error!("failed to copy task text: {err:#}");
            self.error(format!("failed to copy task text: {err:#}"));
        } else {
            self.info("copied task text");
        }
    }

    fn export_tasks(&mut self) {
        match write_export(&self.export_dir, self.app.tasks()) {
            Ok(path) => self.info(format!("exported to {}", path.display())),
            Err(err) => {
                error!("export failed: {err:#}");
                self.error(format!("export failed: {err:#}"));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::super::super::app::App;
    use super::super::super::clipboard::ClipboardSink;
    use super::super::super::view::{MessageLevel, Ui};
    use anyhow::Result;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tasking_app::TaskRepository;
    use tasking_core::TaskState;
    use tasking_store_sqlite::SqliteStore;
    use tempfile::TempDir;

    struct RecordingClipboard {
        copied: Arc<Mutex<Vec<String>>>,
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.copied
                .lock()
                .expect("lock clipboard")
                .push(text.to_owned());
            Ok(())
        }
    }

    fn test_ui() -> (Ui<SqliteStore>, Arc<Mutex<Vec<String>>>) {
        let store = SqliteStore::open_in_memory().expect("open store");
        let repo = TaskRepository::new(store).expect("build repository");
        let copied = Arc::new(Mutex::new(Vec::new()));
        let clipboard = Box::new(RecordingClipboard {
            copied: Arc::clone(&copied),
        });
        let ui = Ui::with_clipboard(
            App::new(repo),
            PathBuf::from("."),
            crate::config::KeyBindingsConfig::default(),
            clipboard,
        );
        (ui, copied)
    }

    fn press(ui: &mut Ui<SqliteStore>, code: KeyCode) {
        ui.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn seed_task(ui: &mut Ui<SqliteStore>, text: &str) {
        ui.app.create_task(text).expect("seed task");
    }

    #[test]
    fn quits_on_q_key() {
        let (mut ui, _) = test_ui();
        press(&mut ui, KeyCode::Char('q'));
        assert!(ui.should_quit);
    }

    #[test]
    fn space_cycles_state_through_the_full_loop() {
        let (mut ui, _) = test_ui();
        seed_task(&mut ui, "Buy milk");
        let glyph = |ui: &Ui<SqliteStore>| ui.app.selected_task().map(|t| t.state.glyph());
        assert_eq!(glyph(&ui), Some("❔"));

        press(&mut ui, KeyCode::Char(' '));
        press(&mut ui, KeyCode::Char(' '));
        assert_eq!(glyph(&ui), Some("✔️"));

        press(&mut ui, KeyCode::Char(' '));
        assert_eq!(glyph(&ui), Some("❔"));
    }

    #[test]
    fn delete_removes_the_selected_task() {
        let (mut ui, _) = test_ui();
        seed_task(&mut ui, "doomed");
        press(&mut ui, KeyCode::Char('d'));
        assert!(!ui.app.has_tasks());
    }

    #[test]
    fn copy_records_the_selected_text() {
        let (mut ui, copied) = test_ui();
        seed_task(&mut ui, "Buy milk");
        press(&mut ui, KeyCode::Char('y'));
        assert_eq!(*copied.lock().expect("lock clipboard"), vec!["Buy milk".to_owned()]);
    }

    #[test]
    fn copy_without_selection_reports_an_error() {
        let (mut ui, copied) = test_ui();
        press(&mut ui, KeyCode::Char('y'));
        assert!(copied.lock().expect("lock clipboard").is_empty());
        assert_eq!(
            ui.message.as_ref().map(|m| m.level),
            Some(MessageLevel::Error)
        );
    }

    #[test]
    fn export_writes_a_timestamped_file() {
        let dir = TempDir::new().expect("create temp dir");
        let (mut ui, _) = test_ui();
        ui.export_dir = dir.path().to_path_buf();
        seed_task(&mut ui, "Buy milk");

        press(&mut ui, KeyCode::Char('x'));

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].path().extension().and_then(|e| e.to_str()),
            Some("json")
        );
    }

    #[test]
    fn n_and_i_open_their_dialogs() {
        let (mut ui, _) = test_ui();
        press(&mut ui, KeyCode::Char('n'));
        assert!(ui.dialog.is_some());

        ui.dialog = None;
        press(&mut ui, KeyCode::Char('i'));
        assert!(ui.dialog.is_some());
    }

    #[test]
    fn shortcuts_are_inactive_while_a_dialog_is_open() {
        let (mut ui, _) = test_ui();
        press(&mut ui, KeyCode::Char('n'));

        // 'q' and 'x' are text input now, not quit/export.
        press(&mut ui, KeyCode::Char('q'));
        press(&mut ui, KeyCode::Char('x'));
        assert!(!ui.should_quit);
        assert_eq!(
            ui.dialog.as_ref().map(|d| d.input.as_str()),
            Some("qx")
        );
    }

    #[test]
    fn cycle_without_tasks_is_a_quiet_no_op() {
        let (mut ui, _) = test_ui();
        press(&mut ui, KeyCode::Char(' '));
        assert!(ui.message.is_none());
    }

    #[test]
    fn refresh_picks_up_external_changes() {
        let (mut ui, _) = test_ui();
        seed_task(&mut ui, "a");
        press(&mut ui, KeyCode::Char(' '));
        assert_eq!(
            ui.app.selected_task().map(|t| t.state),
            Some(TaskState::InProgress)
        );

        press(&mut ui, KeyCode::Char('r'));
        assert_eq!(
            ui.app.selected_task().map(|t| t.state),
            Some(TaskState::InProgress)
        );
    }
}
