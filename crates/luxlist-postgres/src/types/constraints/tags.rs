//! Tags table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Tags table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum TagConstraints {
    #[strum(serialize = "tags_name_not_empty")]
    NameNotEmpty,
    #[strum(serialize = "tags_name_length_max")]
    NameLengthMax,
    #[strum(serialize = "tags_color_format")]
    ColorFormat,

    #[strum(serialize = "tags_user_id_fkey")]
    UserReference,
}

impl TagConstraints {
    /// Creates a new [`TagConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            TagConstraints::NameNotEmpty
            | TagConstraints::NameLengthMax
            | TagConstraints::ColorFormat => ConstraintCategory::Validation,
            TagConstraints::UserReference => ConstraintCategory::Reference,
        }
    }
}

impl From<TagConstraints> for String {
    #[inline]
    fn from(val: TagConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for TagConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
