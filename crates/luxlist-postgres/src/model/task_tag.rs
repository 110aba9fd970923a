//! Task/tag link model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::task_tags;

/// Link between a task and a tag.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = task_tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskTag {
    pub task_id: i64,
    pub tag_id: i64,
    pub created_at: Timestamp,
}

/// Data for linking a tag to a task.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = task_tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTaskTag {
    pub task_id: i64,
    pub tag_id: i64,
}
