//! Filtering options for task queries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::TaskPriority;

/// Filter options for listing tasks.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Case-insensitive substring match on the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Completion state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    /// Exact priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Inclusive lower bound on the due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_from: Option<Timestamp>,
    /// Exclusive upper bound on the due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_until: Option<Timestamp>,
}

impl TaskFilter {
    /// Creates a new empty filter.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by title substring.
    #[inline]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Filters by completion state.
    #[inline]
    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    /// Filters by priority.
    #[inline]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts due dates to `[from, until)`.
    #[inline]
    pub fn with_due_between(mut self, from: Timestamp, until: Timestamp) -> Self {
        self.due_from = Some(from);
        self.due_until = Some(until);
        self
    }

    /// Returns the `ILIKE` pattern for the title filter, with wildcards escaped.
    pub fn title_pattern(&self) -> Option<String> {
        self.title.as_deref().map(|title| {
            let escaped = title
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{escaped}%")
        })
    }

    /// Returns whether any filter is active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.is_completed.is_none()
            && self.priority.is_none()
            && self.due_from.is_none()
            && self.due_until.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        assert!(TaskFilter::new().is_empty());
        assert!(!TaskFilter::new().with_completed(true).is_empty());
    }

    #[test]
    fn title_pattern_escapes_wildcards() {
        let filter = TaskFilter::new().with_title("50%_off");
        assert_eq!(filter.title_pattern().as_deref(), Some("%50\\%\\_off%"));
    }
}
