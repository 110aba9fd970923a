//! Path parameter types for HTTP handlers.

use serde::{Deserialize, Serialize};

/// Path parameters for task operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPathParams {
    /// Unique identifier of the task.
    pub task_id: i64,
}

/// Path parameters for tag operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPathParams {
    /// Unique identifier of the tag.
    pub tag_id: i64,
}

/// Path parameters for task/tag link operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTagPathParams {
    /// Unique identifier of the task.
    pub task_id: i64,
    /// Unique identifier of the tag.
    pub tag_id: i64,
}

/// Path parameters for user-scoped listings.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPathParams {
    /// Unique identifier of the user.
    pub user_id: i64,
}
