//! Task model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::tasks;
use crate::types::TaskPriority;

/// A to-do item owned by a single user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: i64,
    /// Recurring template this task was generated from, if any.
    pub template_id: Option<i64>,
    /// Owner of the task.
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Timestamp,
    pub is_completed: bool,
    pub priority: TaskPriority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for creating a task.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTask {
    pub user_id: i64,
    pub template_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Timestamp,
    pub priority: Option<TaskPriority>,
}

/// Partial update of a task. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Timestamp>,
    pub is_completed: Option<bool>,
    pub priority: Option<TaskPriority>,
}

impl UpdateTask {
    /// Marks the task as completed or not completed.
    pub fn completion(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Default::default()
        }
    }

    /// Returns whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.is_completed.is_none()
            && self.priority.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_update_is_empty() {
        assert!(UpdateTask::default().is_empty());
    }

    #[test]
    fn completion_update_only_touches_flag() {
        let update = UpdateTask::completion(true);
        assert!(!update.is_empty());
        assert_eq!(update.is_completed, Some(true));
        assert!(update.title.is_none());
    }

    #[test]
    fn clearing_description_is_not_empty() {
        let update = UpdateTask {
            description: Some(None),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
