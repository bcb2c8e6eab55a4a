use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Tri-state status of a task.
///
/// Stored and exported as a plain integer. Raw values outside `{0, 1, 2}`
/// are clamped on decode so that every persisted row maps to a valid state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i64", from = "i64")]
pub enum TaskState {
    /// Task has not been started.
    #[default]
    Pending,
    /// Task is actively being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

impl TaskState {
    /// Integer representation used in the `tasks.state` column and in JSON.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// String representation used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Emoji glyph shown next to the task text.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Pending => "❔",
            Self::InProgress => "〰️",
            Self::Done => "✔️",
        }
    }

    /// Advance one step in the cycle `Pending → InProgress → Done → Pending`.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Pending => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Pending,
        }
    }
}

impl From<i64> for TaskState {
    fn from(raw: i64) -> Self {
        // Anything at or past Done clamps to Done; unknown values fall back
        // to Pending, matching the renderer's default glyph.
        match raw {
            1 => Self::InProgress,
            n if n >= 2 => Self::Done,
            _ => Self::Pending,
        }
    }
}

impl From<TaskState> for i64 {
    fn from(state: TaskState) -> Self {
        state.as_i64()
    }
}

/// Error returned when a state expression cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown task state: {0:?} (expected pending, in_progress, done or 0..=2)")]
pub struct ParseStateError(String);

impl FromStr for TaskState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" | "0" => Ok(Self::Pending),
            "in_progress" | "in-progress" | "1" => Ok(Self::InProgress),
            "done" | "2" => Ok(Self::Done),
            other => Err(ParseStateError(other.to_owned())),
        }
    }
}
