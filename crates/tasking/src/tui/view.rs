use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
};

use tasking_app::TaskStore;

use super::app::App;
use super::clipboard::{ClipboardSink, default_clipboard};
use super::constants::UI_MESSAGE_TTL_SECS;
use crate::config::KeyBindingsConfig;

/// Which input dialog is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DialogKind {
    /// Text of a new task.
    AddTask,
    /// Path of a JSON file to import.
    ImportPath,
}

/// State of the single-line input dialog.
#[derive(Debug, Clone)]
pub(super) struct DialogState {
    pub(super) kind: DialogKind,
    pub(super) input: String,
}

impl DialogState {
    pub(super) const fn new(kind: DialogKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }
}

pub(super) struct Ui<S: TaskStore> {
    pub(super) app: App<S>,
    /// Directory receiving export files.
    pub(super) export_dir: PathBuf,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    /// Open input dialog; shortcuts are inactive while this is `Some`.
    pub(super) dialog: Option<DialogState>,
    pub(super) clipboard: Box<dyn ClipboardSink>,
    /// Keybindings configuration.
    pub(super) keybindings: KeyBindingsConfig,
}

impl<S: TaskStore> Ui<S> {
    pub(super) const MAIN_MIN_HEIGHT: u16 = 5;
    pub(super) const INSTRUCTIONS_HEIGHT: u16 = 3;
    pub(super) const STATUS_MESSAGE_HEIGHT: u16 = 3;
    pub(super) const FOOTER_HEIGHT: u16 = Self::INSTRUCTIONS_HEIGHT + Self::STATUS_MESSAGE_HEIGHT;

    pub(super) fn new(app: App<S>, export_dir: PathBuf, keybindings: KeyBindingsConfig) -> Self {
        let clipboard = default_clipboard();
        Self::with_clipboard(app, export_dir, keybindings, clipboard)
    }

    pub(super) fn with_clipboard(
        app: App<S>,
        export_dir: PathBuf,
        keybindings: KeyBindingsConfig,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            app,
            export_dir,
            message: None,
            should_quit: false,
            dialog: None,
            clipboard,
            keybindings,
        }
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(Self::MAIN_MIN_HEIGHT),
                Constraint::Length(Self::FOOTER_HEIGHT),
            ])
            .split(size);

        self.draw_task_list(f, chunks[0]);
        self.draw_status(f, chunks[1]);

        if self.dialog.is_some() {
            self.draw_dialog_popup(f);
        }
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    pub(super) fn tick(&mut self) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
    }
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
