//! Task/tag link constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Task/tag link table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum TaskTagConstraints {
    #[strum(serialize = "task_tags_pkey")]
    AlreadyLinked,

    #[strum(serialize = "task_tags_task_id_fkey")]
    TaskReference,
    #[strum(serialize = "task_tags_tag_id_fkey")]
    TagReference,
}

impl TaskTagConstraints {
    /// Creates a new [`TaskTagConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            TaskTagConstraints::AlreadyLinked => ConstraintCategory::Uniqueness,
            TaskTagConstraints::TaskReference | TaskTagConstraints::TagReference => {
                ConstraintCategory::Reference
            }
        }
    }
}

impl From<TaskTagConstraints> for String {
    #[inline]
    fn from(val: TaskTagConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for TaskTagConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
