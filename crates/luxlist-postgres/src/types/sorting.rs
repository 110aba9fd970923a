//! Sorting options for database queries.

use serde::{Deserialize, Serialize};

/// Sort order direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order (oldest first, smallest first).
    Asc,
    /// Descending order (newest first, largest first).
    #[default]
    Desc,
}

/// Generic sort specification with field and order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBy<F> {
    /// The field to sort by.
    pub field: F,
    /// The sort order direction.
    #[serde(default)]
    pub order: SortOrder,
}

impl<F> SortBy<F> {
    /// Creates a new sort specification with the given field and order.
    #[inline]
    pub fn new(field: F, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Returns whether the sort order is ascending.
    #[inline]
    pub fn is_asc(&self) -> bool {
        matches!(self.order, SortOrder::Asc)
    }
}

/// Fields available for sorting tasks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSortField {
    /// Sort by due date.
    DueDate,
    /// Sort by creation time.
    #[default]
    CreatedAt,
    /// Sort by priority weight.
    Priority,
    /// Sort by title.
    Title,
}

/// Sorting specification for tasks.
pub type TaskSortBy = SortBy<TaskSortField>;
