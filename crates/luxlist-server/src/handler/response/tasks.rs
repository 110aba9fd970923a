//! Task response types.

use jiff::Timestamp;
use luxlist_postgres::model;
use luxlist_postgres::types::{OffsetPagination, TaskPriority};
use serde::{Deserialize, Serialize};

/// Represents a task.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// ID of the task.
    pub id: i64,
    /// Template the task was created from.
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

impl Task {
    /// Creates a Task response from a database model.
    pub fn from_model(task: model::Task) -> Self {
        Self {
            id: task.id,
            template_id: task.template_id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            due_date: task.due_date.into(),
            is_completed: task.is_completed,
            priority: task.priority,
            created_at: task.created_at.into(),
            updated_at: task.updated_at.into(),
        }
    }
}

/// Single task envelope, `{ "task": ... }`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task: Task,
}

impl TaskResponse {
    pub fn from_model(task: model::Task) -> Self {
        Self {
            task: Task::from_model(task),
        }
    }
}

/// One page of tasks.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksPage {
    /// Tasks on this page.
    pub tasks: Vec<Task>,
    /// Page number starting at 1.
    pub page: i64,
    /// Page size the tasks were fetched with.
    pub limit: i64,
}

impl TasksPage {
    /// Creates a page response from database models.
    pub fn from_models(tasks: Vec<model::Task>, pagination: OffsetPagination) -> Self {
        Self {
            tasks: tasks.into_iter().map(Task::from_model).collect(),
            page: pagination.page_number(),
            limit: pagination.limit,
        }
    }
}
