//! Domain types for tasking.

/// Identifier types.
pub mod id;
/// Task status and its cycle.
pub mod state;

use serde::{Deserialize, Serialize};

pub use crate::id::TaskId;
pub use crate::state::{ParseStateError, TaskState};

/// A unit of work: text plus a tri-state status.
///
/// The id is assigned by the storage layer on insert; import reassigns ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Storage-assigned identifier.
    pub id: TaskId,
    /// Human-readable text, non-empty after trimming.
    pub text: String,
    /// Current status.
    pub state: TaskState,
}

impl Task {
    /// Construct a task from its raw column values.
    #[must_use]
    pub fn from_row(id: i64, text: String, state: i64) -> Self {
        Self {
            id: TaskId(id),
            text,
            state: TaskState::from(state),
        }
    }
}

/// Sort tasks ascending by id.
///
/// The comparator is total, so rendering order is always non-decreasing by
/// id regardless of insertion or update order.
pub fn sort_by_id(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.id.cmp(&b.id));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, text: &str) -> Task {
        Task {
            id: TaskId(id),
            text: text.to_owned(),
            state: TaskState::Pending,
        }
    }

    #[test]
    fn sort_orders_ascending_by_id() {
        let mut tasks = vec![task(3, "c"), task(1, "a"), task(2, "b")];
        sort_by_id(&mut tasks);
        let ids: Vec<i64> = tasks.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn from_row_clamps_state() {
        let t = Task::from_row(1, "x".into(), 9);
        assert_eq!(t.state, TaskState::Done);
    }

    #[test]
    fn wire_shape_matches_export_format() {
        let t = Task {
            id: TaskId(5),
            text: "Buy milk".into(),
            state: TaskState::InProgress,
        };
        let json = serde_json::to_string(&t).expect("must serialize");
        assert_eq!(json, r#"{"id":5,"text":"Buy milk","state":1}"#);
    }
}
