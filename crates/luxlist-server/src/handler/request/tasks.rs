//! Task request types.

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use luxlist_postgres::model;
use luxlist_postgres::types::{
    OffsetPagination, SortOrder, TaskFilter, TaskPriority, TaskSortBy, TaskSortField,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::not_blank;
use crate::handler::{ErrorKind, Result};

/// Request payload for creating a task.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    /// Task title.
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub title: String,
    /// Optional longer description.
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    /// When the task is due (RFC 3339).
    pub due_date: Timestamp,
    /// Priority, `medium` when omitted.
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    /// Template the task was created from.
    #[serde(default)]
    pub template_id: Option<i64>,
}

impl CreateTask {
    /// Converts to database model.
    pub fn into_model(self, user_id: i64) -> model::NewTask {
        model::NewTask {
            user_id,
            template_id: self.template_id,
            title: self.title,
            description: self.description.filter(|d| !d.trim().is_empty()),
            due_date: self.due_date.into(),
            priority: self.priority,
        }
    }
}

/// Request payload for updating a task. Omitted fields are unchanged.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    /// New title.
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub title: Option<String>,
    /// New description; an empty string clears it.
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    /// New due date.
    pub due_date: Option<Timestamp>,
    /// New completion state.
    pub is_completed: Option<bool>,
    /// New priority.
    pub priority: Option<TaskPriority>,
}

impl UpdateTask {
    /// Converts to database model.
    pub fn into_model(self) -> model::UpdateTask {
        model::UpdateTask {
            title: self.title,
            description: self.description.map(Some),
            due_date: self.due_date.map(Into::into),
            is_completed: self.is_completed,
            priority: self.priority,
        }
    }
}

/// Query parameters for listing tasks.
///
/// Parameter names are snake_case: `?page=2&limit=20&is_completed=false`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ListTasks {
    /// Page number starting at 1.
    pub page: Option<i64>,
    /// Page size, 10 by default.
    pub limit: Option<i64>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Completion state.
    pub is_completed: Option<bool>,
    /// Exact priority.
    pub priority: Option<TaskPriority>,
    /// Calendar day (UTC) the task is due on, `YYYY-MM-DD`.
    pub due_date: Option<Date>,
    /// Sort field, `created_at` by default.
    pub order_by: Option<TaskSortField>,
    /// Sort direction, `desc` by default.
    pub order: Option<SortOrder>,
}

impl ListTasks {
    /// Returns the page window. Non-positive values fall back to defaults.
    pub fn pagination(&self) -> OffsetPagination {
        OffsetPagination::from_page(self.page, self.limit)
    }

    /// Returns the sort order.
    pub fn sort_by(&self) -> TaskSortBy {
        TaskSortBy::new(
            self.order_by.unwrap_or_default(),
            self.order.unwrap_or_default(),
        )
    }

    /// Returns the row filter.
    ///
    /// A due date selects the half-open UTC range `[day, day + 1)`.
    pub fn filter(&self) -> Result<TaskFilter> {
        let mut filter = TaskFilter::new();

        if let Some(title) = self.title.as_deref().map(str::trim)
            && !title.is_empty()
        {
            filter = filter.with_title(title);
        }

        if let Some(is_completed) = self.is_completed {
            filter = filter.with_completed(is_completed);
        }

        if let Some(priority) = self.priority {
            filter = filter.with_priority(priority);
        }

        if let Some(date) = self.due_date {
            let (from, until) = utc_day(date).map_err(|error| {
                ErrorKind::BadRequest
                    .with_message("Invalid due date")
                    .with_context(error.to_string())
            })?;
            filter = filter.with_due_between(from, until);
        }

        Ok(filter)
    }
}

fn utc_day(date: Date) -> Result<(Timestamp, Timestamp), jiff::Error> {
    let from = date.to_zoned(TimeZone::UTC)?.timestamp();
    let until = date.tomorrow()?.to_zoned(TimeZone::UTC)?.timestamp();
    Ok((from, until))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sort_newest_first() {
        let query = ListTasks::default();
        let sort_by = query.sort_by();

        assert_eq!(sort_by.field, TaskSortField::CreatedAt);
        assert_eq!(sort_by.order, SortOrder::Desc);
        assert_eq!(query.pagination(), OffsetPagination::from_page(Some(1), Some(10)));
        assert!(query.filter().unwrap().is_empty());
    }

    #[test]
    fn due_date_selects_whole_utc_day() {
        let query = ListTasks {
            due_date: Some(jiff::civil::date(2024, 5, 1)),
            ..Default::default()
        };
        let filter = query.filter().unwrap();

        assert_eq!(
            filter.due_from,
            Some("2024-05-01T00:00:00Z".parse().unwrap())
        );
        assert_eq!(
            filter.due_until,
            Some("2024-05-02T00:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn blank_title_is_ignored() {
        let query = ListTasks {
            title: Some("  ".into()),
            ..Default::default()
        };
        assert!(query.filter().unwrap().title.is_none());
    }

    #[test]
    fn query_string_parses() {
        let query: ListTasks = parse_query(
            "page=2&limit=5&is_completed=true&priority=high&order_by=due_date&order=asc",
        );
        assert_eq!(query.page, Some(2));
        assert_eq!(query.is_completed, Some(true));
        assert_eq!(query.priority, Some(TaskPriority::High));
        assert!(query.sort_by().is_asc());
    }

    fn parse_query(query: &str) -> ListTasks {
        let uri: axum::http::Uri = format!("/tasks?{query}").parse().unwrap();
        axum::extract::Query::<ListTasks>::try_from_uri(&uri)
            .unwrap()
            .0
    }

    #[test]
    fn blank_update_title_is_rejected() {
        let request = UpdateTask {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn empty_description_clears() {
        let update = UpdateTask {
            description: Some(String::new()),
            ..Default::default()
        }
        .into_model();
        assert_eq!(update.description, Some(Some(String::new())));
    }
}
