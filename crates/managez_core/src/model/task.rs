//! Task domain model.
//!
//! # Responsibility
//! - Define the checklist entry record rendered by the plugin view.
//! - Own the ordinal mapping used by persisted state for enum fields.
//!
//! # Invariants
//! - `id` is assigned once by the owning model and never mutated.
//! - Enum ordinals are part of the persisted format; do not reorder variants.

use serde::{Deserialize, Serialize};

/// Identifier unique within one task list model lifetime.
pub type TaskId = u32;

/// Urgency marker for one task.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Every priority in persisted ordinal order.
    pub const ALL: [Priority; 4] = [Self::None, Self::Low, Self::Medium, Self::High];

    /// Persisted integer value.
    pub fn ordinal(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Maps a persisted integer back to a priority.
    ///
    /// Returns `None` for values outside `0..=3`.
    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// Stable display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Production stage a task belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    General,
    Mix,
    Master,
    Record,
    Release,
}

impl Category {
    /// Every category in persisted ordinal order.
    pub const ALL: [Category; 5] = [
        Self::General,
        Self::Mix,
        Self::Master,
        Self::Record,
        Self::Release,
    ];

    /// Persisted integer value.
    pub fn ordinal(self) -> i64 {
        match self {
            Self::General => 0,
            Self::Mix => 1,
            Self::Master => 2,
            Self::Record => 3,
            Self::Release => 4,
        }
    }

    /// Maps a persisted integer back to a category.
    ///
    /// Returns `None` for values outside `0..=4`.
    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::General),
            1 => Some(Self::Mix),
            2 => Some(Self::Master),
            3 => Some(Self::Record),
            4 => Some(Self::Release),
            _ => None,
        }
    }

    /// Stable display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Mix => "Mix",
            Self::Master => "Master",
            Self::Record => "Record",
            Self::Release => "Release",
        }
    }

    /// Short bracketed tag shown next to task rows.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::General => "[G]",
            Self::Mix => "[M]",
            Self::Master => "[MS]",
            Self::Record => "[R]",
            Self::Release => "[RL]",
        }
    }
}

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub category: Category,
}

impl Task {
    /// Creates an open task with default priority and category.
    ///
    /// Text is stored as given; trimming is the caller's concern.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            priority: Priority::None,
            category: Category::General,
        }
    }
}
