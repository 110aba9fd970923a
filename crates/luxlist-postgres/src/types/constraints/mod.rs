//! Database constraint violations organized by table.

mod tags;
mod task_tags;
mod tasks;
mod users;

use std::fmt;

use serde::{Deserialize, Serialize};
pub use tags::TagConstraints;
pub use task_tags::TaskTagConstraints;
pub use tasks::TaskConstraints;
pub use users::UserConstraints;

/// Any known constraint violation, grouped by table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    User(UserConstraints),
    Task(TaskConstraints),
    Tag(TagConstraints),
    TaskTag(TaskTagConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Foreign key references to rows that do not exist.
    Reference,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Parses a constraint name reported by PostgreSQL.
    ///
    /// ```
    /// use luxlist_postgres::types::ConstraintViolation;
    ///
    /// assert!(ConstraintViolation::new("users_name_unique_idx").is_some());
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        // `task_tags_` must be checked before `tasks_`/`tags_` prefixes.
        if constraint.starts_with("task_tags_") {
            TaskTagConstraints::new(constraint).map(Self::TaskTag)
        } else if constraint.starts_with("tasks_") {
            TaskConstraints::new(constraint).map(Self::Task)
        } else if constraint.starts_with("tags_") {
            TagConstraints::new(constraint).map(Self::Tag)
        } else if constraint.starts_with("users_") {
            UserConstraints::new(constraint).map(Self::User)
        } else {
            None
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::User(_) => "users",
            ConstraintViolation::Task(_) => "tasks",
            ConstraintViolation::Tag(_) => "tags",
            ConstraintViolation::TaskTag(_) => "task_tags",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::User(c) => c.categorize(),
            ConstraintViolation::Task(c) => c.categorize(),
            ConstraintViolation::Tag(c) => c.categorize(),
            ConstraintViolation::TaskTag(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::User(c) => write!(f, "{c}"),
            ConstraintViolation::Task(c) => write!(f, "{c}"),
            ConstraintViolation::Tag(c) => write!(f, "{c}"),
            ConstraintViolation::TaskTag(c) => write!(f, "{c}"),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ConstraintViolation::new(&value).ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_table_prefix() {
        assert_eq!(
            ConstraintViolation::new("task_tags_pkey"),
            Some(ConstraintViolation::TaskTag(TaskTagConstraints::AlreadyLinked))
        );
        assert_eq!(
            ConstraintViolation::new("tags_color_format"),
            Some(ConstraintViolation::Tag(TagConstraints::ColorFormat))
        );
        assert_eq!(
            ConstraintViolation::new("tasks_title_not_empty"),
            Some(ConstraintViolation::Task(TaskConstraints::TitleNotEmpty))
        );
        assert_eq!(
            ConstraintViolation::new("users_name_unique_idx"),
            Some(ConstraintViolation::User(UserConstraints::NameUnique))
        );
    }

    #[test]
    fn categorizes_violations() {
        let violation = ConstraintViolation::new("task_tags_pkey").unwrap();
        assert_eq!(violation.categorize(), ConstraintCategory::Uniqueness);
        assert_eq!(violation.table_name(), "task_tags");

        let violation = ConstraintViolation::new("tags_user_id_fkey").unwrap();
        assert_eq!(violation.categorize(), ConstraintCategory::Reference);
    }

    #[test]
    fn round_trips_through_serde() {
        let violation = ConstraintViolation::Tag(TagConstraints::NameLengthMax);
        let json = serde_json::to_string(&violation).unwrap();
        assert_eq!(json, "\"tags_name_length_max\"");
    }
}
