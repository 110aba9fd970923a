//! Constraint violation to HTTP error conversion, one impl per table.

use luxlist_postgres::types::{
    TagConstraints, TaskConstraints, TaskTagConstraints, UserConstraints,
};

use crate::handler::{Error, ErrorKind};

impl From<UserConstraints> for Error<'static> {
    fn from(c: UserConstraints) -> Self {
        let error = match c {
            UserConstraints::NameNotEmpty => {
                ErrorKind::BadRequest.with_message("Name cannot be empty")
            }
            UserConstraints::NameLengthMax => {
                ErrorKind::BadRequest.with_message("Name is too long")
            }
            UserConstraints::NameUnique => {
                ErrorKind::Conflict.with_message("Name is already taken")
            }
        };

        error.with_resource("user")
    }
}

impl From<TaskConstraints> for Error<'static> {
    fn from(c: TaskConstraints) -> Self {
        let error = match c {
            TaskConstraints::TitleNotEmpty => {
                ErrorKind::BadRequest.with_message("Task title cannot be empty")
            }
            TaskConstraints::TitleLengthMax => {
                ErrorKind::BadRequest.with_message("Task title is too long")
            }
            TaskConstraints::DescriptionLengthMax => {
                ErrorKind::BadRequest.with_message("Task description is too long")
            }
            TaskConstraints::UpdatedAfterCreated | TaskConstraints::UserReference => {
                ErrorKind::InternalServerError.into_error()
            }
        };

        error.with_resource("task")
    }
}

impl From<TagConstraints> for Error<'static> {
    fn from(c: TagConstraints) -> Self {
        let error = match c {
            TagConstraints::NameNotEmpty => {
                ErrorKind::BadRequest.with_message("Tag name cannot be empty")
            }
            TagConstraints::NameLengthMax => {
                ErrorKind::BadRequest.with_message("Tag name is too long")
            }
            TagConstraints::ColorFormat => ErrorKind::BadRequest
                .with_message("Color must be a valid hex code (e.g., #FFFFFF)"),
            TagConstraints::UserReference => ErrorKind::InternalServerError.into_error(),
        };

        error.with_resource("tag")
    }
}

impl From<TaskTagConstraints> for Error<'static> {
    fn from(c: TaskTagConstraints) -> Self {
        let error = match c {
            TaskTagConstraints::AlreadyLinked => {
                ErrorKind::Conflict.with_message("Tag is already linked to the task")
            }
            TaskTagConstraints::TaskReference => {
                ErrorKind::NotFound.with_message("Task not found")
            }
            TaskTagConstraints::TagReference => ErrorKind::NotFound.with_message("Tag not found"),
        };

        error.with_resource("task_tag")
    }
}
