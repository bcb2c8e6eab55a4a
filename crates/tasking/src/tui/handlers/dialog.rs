use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::error;

use tasking_app::{ImportReport, TaskStore, parse_import};

use super::super::app::App;
use super::super::view::{DialogKind, Ui};
use crate::config::{Action, ViewType};

impl<S: TaskStore> Ui<S> {
    pub(super) fn handle_dialog_key(&mut self, key: KeyEvent) {
        if self.keybindings.matches(ViewType::Dialog, Action::Cancel, &key) {
            // Cancel clears the buffer and closes without saving.
            self.dialog = None;
            return;
        }

        if self.keybindings.matches(ViewType::Dialog, Action::Confirm, &key) {
            self.confirm_dialog();
            return;
        }

        match key.code {
            KeyCode::Char(c) => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.input.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.input.pop();
                }
            }
            _ => {}
        }
    }

    fn confirm_dialog(&mut self) {
        let Some(dialog) = self.dialog.clone() else {
            return;
        };

        match dialog.kind {
            DialogKind::AddTask => {
                // Empty input is ignored and the dialog stays open.
                if dialog.input.trim().is_empty() {
                    return;
                }
                match self.app.create_task(&dialog.input) {
                    Ok(id) => {
                        self.dialog = None;
                        self.info(format!("created task {id}"));
                    }
                    Err(err) => {
                        error!("failed to create task: {err:#}");
                        self.error(format!("failed to create task: {err:#}"));
                    }
                }
            }
            DialogKind::ImportPath => {
                let path = Path::new(dialog.input.trim()).to_path_buf();
                self.dialog = None;
                match import_file(&mut self.app, &path) {
                    Ok(report) => self.info(format!(
                        "imported {} tasks ({} skipped)",
                        report.inserted, report.skipped
                    )),
                    Err(err) => {
                        error!("import failed: {err:#}");
                        self.error(format!("import failed: {err:#}"));
                    }
                }
            }
        }
    }
}

fn import_file<S: TaskStore>(app: &mut App<S>, path: &Path) -> Result<ImportReport> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let batch = parse_import(&raw)?;
    app.import_replace(&batch)
}
