//! Database models for all tables.
//!
//! Each table has a `Queryable` row type plus `Insertable` and, where rows
//! can change, `AsChangeset` companions.

mod tag;
mod task;
mod task_tag;
mod user;

pub use tag::{NewTag, Tag, UpdateTag};
pub use task::{NewTask, Task, UpdateTask};
pub use task_tag::{NewTaskTag, TaskTag};
pub use user::{NewUser, User};
