//! Keybindings configuration for the TUI.

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

macro_rules! vec_of_strings {
    ($($s:expr),* $(,)?) => {
        vec![$($s.to_string()),*]
    };
}

/// Keybindings configuration for all TUI views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindingsConfig {
    /// Keybindings for the task list view.
    pub task_list: TaskListKeyBindings,
    /// Keybindings for the input dialogs (add task, import path).
    pub dialog: DialogKeyBindings,
}

/// Keybindings for the task list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskListKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Move down in the list.
    pub down: Vec<String>,
    /// Move up in the list.
    pub up: Vec<String>,
    /// Reload the task list from storage.
    pub refresh: Vec<String>,
    /// Cycle the selected task's state one step.
    pub cycle_state: Vec<String>,
    /// Delete the selected task.
    pub delete_task: Vec<String>,
    /// Copy the selected task's text to the clipboard.
    pub copy_text: Vec<String>,
    /// Open the add-task dialog.
    pub create_task: Vec<String>,
    /// Open the import path prompt.
    pub import: Vec<String>,
    /// Export all tasks to a timestamped JSON file.
    pub export: Vec<String>,
}

/// Keybindings for input dialogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeyBindings {
    /// Confirm the dialog input.
    pub confirm: Vec<String>,
    /// Cancel the dialog, clearing its input.
    pub cancel: Vec<String>,
}

impl Default for TaskListKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["q", "Q"],
            down: vec_of_strings!["j", "J", "Down"],
            up: vec_of_strings!["k", "K", "Up"],
            refresh: vec_of_strings!["r", "R"],
            cycle_state: vec_of_strings!["Space", "Enter"],
            delete_task: vec_of_strings!["d", "D"],
            copy_text: vec_of_strings!["y", "Y"],
            create_task: vec_of_strings!["n", "N"],
            import: vec_of_strings!["i", "I"],
            export: vec_of_strings!["x", "X"],
        }
    }
}

impl Default for DialogKeyBindings {
    fn default() -> Self {
        Self {
            confirm: vec_of_strings!["Enter"],
            cancel: vec_of_strings!["Esc"],
        }
    }
}

/// View type for keybinding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    /// Task list view.
    TaskList,
    /// Input dialog (add task, import path).
    Dialog,
}

/// Action that can be performed in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Move down.
    Down,
    /// Move up.
    Up,
    /// Reload from storage.
    Refresh,
    /// Cycle the selected task's state.
    CycleState,
    /// Delete the selected task.
    DeleteTask,
    /// Copy the selected task's text.
    CopyText,
    /// Open the add-task dialog.
    CreateTask,
    /// Open the import path prompt.
    Import,
    /// Export all tasks.
    Export,
    /// Confirm dialog input.
    Confirm,
    /// Cancel the dialog.
    Cancel,
}

impl KeyBindingsConfig {
    /// Whether `key` triggers `action` in `view`.
    #[must_use]
    pub fn matches(&self, view: ViewType, action: Action, key: &KeyEvent) -> bool {
        self.bindings(view, action).is_some_and(|keys| {
            keys.iter()
                .any(|expr| parse_key(expr).is_ok_and(|parsed| key_matches(&parsed, key)))
        })
    }

    fn bindings(&self, view: ViewType, action: Action) -> Option<&[String]> {
        match (view, action) {
            (ViewType::TaskList, Action::Quit) => Some(&self.task_list.quit),
            (ViewType::TaskList, Action::Down) => Some(&self.task_list.down),
            (ViewType::TaskList, Action::Up) => Some(&self.task_list.up),
            (ViewType::TaskList, Action::Refresh) => Some(&self.task_list.refresh),
            (ViewType::TaskList, Action::CycleState) => Some(&self.task_list.cycle_state),
            (ViewType::TaskList, Action::DeleteTask) => Some(&self.task_list.delete_task),
            (ViewType::TaskList, Action::CopyText) => Some(&self.task_list.copy_text),
            (ViewType::TaskList, Action::CreateTask) => Some(&self.task_list.create_task),
            (ViewType::TaskList, Action::Import) => Some(&self.task_list.import),
            (ViewType::TaskList, Action::Export) => Some(&self.task_list.export),
            (ViewType::Dialog, Action::Confirm) => Some(&self.dialog.confirm),
            (ViewType::Dialog, Action::Cancel) => Some(&self.dialog.cancel),
            _ => None,
        }
    }
}

fn key_matches(parsed: &KeyEvent, actual: &KeyEvent) -> bool {
    if parsed.code != actual.code {
        return false;
    }
    if matches!(parsed.code, KeyCode::Char(_)) {
        // Terminals report SHIFT for uppercase characters; the character
        // itself already carries the case.
        (parsed.modifiers | KeyModifiers::SHIFT) == (actual.modifiers | KeyModifiers::SHIFT)
    } else {
        parsed.modifiers == actual.modifiers
    }
}

/// Parse a key string into a `KeyEvent`.
///
/// # Examples
/// - "j" -> `KeyCode::Char('j')`
/// - "Enter" -> `KeyCode::Enter`
/// - "Ctrl+d" -> `KeyCode::Char('d')` with CONTROL modifier
///
/// # Errors
/// Returns an error for empty expressions, unknown modifiers, or unknown
/// key names.
pub fn parse_key(s: &str) -> Result<KeyEvent> {
    let parts: Vec<&str> = s.split('+').collect();

    if parts.is_empty() {
        bail!("Empty key string");
    }

    let mut modifiers = KeyModifiers::NONE;
    let key_part = if parts.len() > 1 {
        for &modifier in &parts[..parts.len() - 1] {
            match modifier {
                "Ctrl" | "Control" => modifiers |= KeyModifiers::CONTROL,
                "Alt" => modifiers |= KeyModifiers::ALT,
                "Shift" => modifiers |= KeyModifiers::SHIFT,
                other => bail!("Unknown modifier: {}", other),
            }
        }
        parts[parts.len() - 1]
    } else {
        parts[0]
    };

    let code = parse_key_code(key_part)?;

    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    match s {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" => Ok(KeyCode::Esc),
        "Space" => Ok(KeyCode::Char(' ')),
        "Backspace" => Ok(KeyCode::Backspace),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Tab" => Ok(KeyCode::Tab),
        "Delete" => Ok(KeyCode::Delete),
        s if s.chars().count() == 1 => {
            let ch = s.chars().next().ok_or_else(|| anyhow!("Empty char"))?;
            Ok(KeyCode::Char(ch))
        }
        other => bail!("Unknown key: {}", other),
    }
}

/// Validate the keybindings configuration.
///
/// Checks for empty bindings, invalid key expressions, and key conflicts
/// within each view.
///
/// # Errors
/// Returns an error describing the first problem found.
pub fn validate_keybindings_config(config: &KeyBindingsConfig) -> Result<()> {
    for (view, bindings) in [
        ("task_list", collect_task_list_bindings(config)),
        ("dialog", collect_dialog_bindings(config)),
    ] {
        for (action, keys) in &bindings {
            if keys.is_empty() {
                bail!("{view}.{action} must have at least one key binding");
            }
            for key in keys {
                parse_key(key).with_context(|| format!("Invalid key '{key}' in {view}.{action}"))?;
            }
        }
        validate_view_keybindings(view, bindings)?;
    }
    Ok(())
}

fn validate_view_keybindings(view_name: &str, bindings: HashMap<String, Vec<String>>) -> Result<()> {
    let mut key_to_actions: HashMap<String, Vec<String>> = HashMap::new();

    for (action, keys) in bindings {
        for key in keys {
            key_to_actions.entry(key).or_default().push(action.clone());
        }
    }

    for (key, actions) in key_to_actions {
        if actions.len() > 1 {
            bail!(
                "Key '{}' is bound to multiple actions in {}: {:?}",
                key,
                view_name,
                actions
            );
        }
    }

    Ok(())
}

fn collect_task_list_bindings(config: &KeyBindingsConfig) -> HashMap<String, Vec<String>> {
    let mut bindings = HashMap::new();
    bindings.insert("quit".to_string(), config.task_list.quit.clone());
    bindings.insert("down".to_string(), config.task_list.down.clone());
    bindings.insert("up".to_string(), config.task_list.up.clone());
    bindings.insert("refresh".to_string(), config.task_list.refresh.clone());
    bindings.insert("cycle_state".to_string(), config.task_list.cycle_state.clone());
    bindings.insert("delete_task".to_string(), config.task_list.delete_task.clone());
    bindings.insert("copy_text".to_string(), config.task_list.copy_text.clone());
    bindings.insert("create_task".to_string(), config.task_list.create_task.clone());
    bindings.insert("import".to_string(), config.task_list.import.clone());
    bindings.insert("export".to_string(), config.task_list.export.clone());
    bindings
}

fn collect_dialog_bindings(config: &KeyBindingsConfig) -> HashMap<String, Vec<String>> {
    let mut bindings = HashMap::new();
    bindings.insert("confirm".to_string(), config.dialog.confirm.clone());
    bindings.insert("cancel".to_string(), config.dialog.cancel.clone());
    bindings
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        validate_keybindings_config(&KeyBindingsConfig::default()).expect("defaults must be valid");
    }

    #[test]
    fn parse_key_handles_plain_special_and_modified_keys() {
        assert_eq!(parse_key("j").expect("parse").code, KeyCode::Char('j'));
        assert_eq!(parse_key("Space").expect("parse").code, KeyCode::Char(' '));
        assert_eq!(parse_key("Esc").expect("parse").code, KeyCode::Esc);

        let ctrl_d = parse_key("Ctrl+d").expect("parse");
        assert_eq!(ctrl_d.code, KeyCode::Char('d'));
        assert_eq!(ctrl_d.modifiers, KeyModifiers::CONTROL);

        assert!(parse_key("NoSuchKey").is_err());
        assert!(parse_key("Hyper+j").is_err());
    }

    #[test]
    fn matches_shortcut_keys_in_task_list() {
        let config = KeyBindingsConfig::default();
        let key = KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE);
        assert!(config.matches(ViewType::TaskList, Action::Import, &key));
        assert!(!config.matches(ViewType::TaskList, Action::Export, &key));
        assert!(!config.matches(ViewType::Dialog, Action::Import, &key));
    }

    #[test]
    fn uppercase_bindings_tolerate_shift_modifier() {
        let config = KeyBindingsConfig::default();
        let key = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        assert!(config.matches(ViewType::TaskList, Action::Export, &key));
    }

    #[test]
    fn conflicting_keys_within_a_view_are_rejected() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.export = vec_of_strings!["i"];
        assert!(validate_keybindings_config(&config).is_err());
    }

    #[test]
    fn empty_binding_lists_are_rejected() {
        let mut config = KeyBindingsConfig::default();
        config.dialog.confirm.clear();
        assert!(validate_keybindings_config(&config).is_err());
    }
}
