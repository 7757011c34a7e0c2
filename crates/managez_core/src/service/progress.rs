//! Derived read-only queries over the task list.
//!
//! # Responsibility
//! - Compute the completion summary shown in the view header.
//! - Resolve a free-text filter to task positions.
//!
//! # Invariants
//! - Queries never mutate the model and never notify listeners.

use crate::service::task_list::TaskListModel;
use std::fmt::{Display, Formatter};

/// Completion summary for the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    /// Whole percent, rounded down. `0` for an empty list.
    pub percent: usize,
}

impl ProgressSummary {
    pub fn of(model: &TaskListModel) -> Self {
        let completed = model.completed_count();
        let total = model.total_count();
        let percent = if total > 0 { completed * 100 / total } else { 0 };
        Self {
            completed,
            total,
            percent,
        }
    }
}

impl Display for ProgressSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} ({}%)", self.completed, self.total, self.percent)
    }
}

impl TaskListModel {
    pub fn progress(&self) -> ProgressSummary {
        ProgressSummary::of(self)
    }

    /// Positions of tasks whose text contains `term`, case-insensitively.
    ///
    /// An empty term matches every task. The term is not trimmed, so
    /// surrounding spaces must appear in the text.
    pub fn matching_indices(&self, term: &str) -> Vec<usize> {
        let needle = term.to_lowercase();
        self.tasks()
            .iter()
            .enumerate()
            .filter(|(_, task)| needle.is_empty() || task.text.to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect()
    }
}
