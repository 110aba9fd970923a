//! Tasks table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Tasks table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum TaskConstraints {
    #[strum(serialize = "tasks_title_not_empty")]
    TitleNotEmpty,
    #[strum(serialize = "tasks_title_length_max")]
    TitleLengthMax,
    #[strum(serialize = "tasks_description_length_max")]
    DescriptionLengthMax,

    #[strum(serialize = "tasks_updated_after_created")]
    UpdatedAfterCreated,

    #[strum(serialize = "tasks_user_id_fkey")]
    UserReference,
}

impl TaskConstraints {
    /// Creates a new [`TaskConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            TaskConstraints::TitleNotEmpty
            | TaskConstraints::TitleLengthMax
            | TaskConstraints::DescriptionLengthMax => ConstraintCategory::Validation,
            TaskConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
            TaskConstraints::UserReference => ConstraintCategory::Reference,
        }
    }
}

impl From<TaskConstraints> for String {
    #[inline]
    fn from(val: TaskConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for TaskConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
