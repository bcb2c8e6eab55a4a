//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Highlight symbol shown beside the selected list entry.
pub const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Width percentage for input dialogs before clamping.
pub const DIALOG_WIDTH_PERCENT: u16 = 60;
/// Minimum width for input dialogs.
pub const DIALOG_MIN_WIDTH: u16 = 30;
/// Fixed height of input dialogs.
pub const DIALOG_HEIGHT: u16 = 3;
/// Maximum grapheme count for task text in a list row.
pub const TASK_TEXT_MAX_GRAPHEMES: usize = 80;
