//! Task repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{NewTask, Task, UpdateTask};
use crate::types::{OffsetPagination, SortOrder, TaskFilter, TaskSortBy, TaskSortField};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for task database operations.
///
/// All lookups are scoped to the owning user.
pub trait TaskRepository {
    /// Creates a new task.
    fn create_task(&mut self, new_task: NewTask) -> impl Future<Output = PgResult<Task>> + Send;

    /// Finds a task owned by `user_id`.
    fn find_task(
        &mut self,
        user_id: i64,
        task_id: i64,
    ) -> impl Future<Output = PgResult<Option<Task>>> + Send;

    /// Lists tasks owned by `user_id`, filtered, sorted and paginated.
    ///
    /// Ties on the sort field are broken by id so pages are stable.
    fn list_tasks(
        &mut self,
        user_id: i64,
        filter: &TaskFilter,
        sort_by: TaskSortBy,
        pagination: OffsetPagination,
    ) -> impl Future<Output = PgResult<Vec<Task>>> + Send;

    /// Applies a partial update to a task owned by `user_id`.
    ///
    /// An empty update returns the current row unchanged. Returns `None` if
    /// the task does not exist.
    fn update_task(
        &mut self,
        user_id: i64,
        task_id: i64,
        updates: UpdateTask,
    ) -> impl Future<Output = PgResult<Option<Task>>> + Send;

    /// Marks a task as completed or not completed.
    fn set_task_completed(
        &mut self,
        user_id: i64,
        task_id: i64,
        is_completed: bool,
    ) -> impl Future<Output = PgResult<Option<Task>>> + Send;

    /// Permanently deletes a task and its tag links.
    ///
    /// Returns `false` if no task was removed.
    fn delete_task(
        &mut self,
        user_id: i64,
        task_id: i64,
    ) -> impl Future<Output = PgResult<bool>> + Send;
}

impl TaskRepository for PgConnection {
    async fn create_task(&mut self, mut new_task: NewTask) -> PgResult<Task> {
        use schema::tasks;

        new_task.title = new_task.title.trim().to_owned();
        new_task.description = new_task
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        diesel::insert_into(tasks::table)
            .values(&new_task)
            .returning(Task::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_task(&mut self, user_id: i64, task_id: i64) -> PgResult<Option<Task>> {
        use schema::tasks::{self, dsl};

        tasks::table
            .filter(dsl::id.eq(task_id))
            .filter(dsl::user_id.eq(user_id))
            .select(Task::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_tasks(
        &mut self,
        user_id: i64,
        filter: &TaskFilter,
        sort_by: TaskSortBy,
        pagination: OffsetPagination,
    ) -> PgResult<Vec<Task>> {
        use schema::tasks::{self, dsl};

        let mut query = tasks::table.filter(dsl::user_id.eq(user_id)).into_boxed();

        if let Some(pattern) = filter.title_pattern() {
            query = query.filter(dsl::title.ilike(pattern));
        }

        if let Some(is_completed) = filter.is_completed {
            query = query.filter(dsl::is_completed.eq(is_completed));
        }

        if let Some(priority) = filter.priority {
            query = query.filter(dsl::priority.eq(priority));
        }

        if let Some(from) = filter.due_from {
            query = query.filter(dsl::due_date.ge(jiff_diesel::Timestamp::from(from)));
        }

        if let Some(until) = filter.due_until {
            query = query.filter(dsl::due_date.lt(jiff_diesel::Timestamp::from(until)));
        }

        query = match (sort_by.field, sort_by.order) {
            (TaskSortField::DueDate, SortOrder::Asc) => {
                query.order((dsl::due_date.asc(), dsl::id.asc()))
            }
            (TaskSortField::DueDate, SortOrder::Desc) => {
                query.order((dsl::due_date.desc(), dsl::id.desc()))
            }
            (TaskSortField::CreatedAt, SortOrder::Asc) => {
                query.order((dsl::created_at.asc(), dsl::id.asc()))
            }
            (TaskSortField::CreatedAt, SortOrder::Desc) => {
                query.order((dsl::created_at.desc(), dsl::id.desc()))
            }
            // Enum order in Postgres is declaration order: low < medium < high.
            (TaskSortField::Priority, SortOrder::Asc) => {
                query.order((dsl::priority.asc(), dsl::id.asc()))
            }
            (TaskSortField::Priority, SortOrder::Desc) => {
                query.order((dsl::priority.desc(), dsl::id.desc()))
            }
            (TaskSortField::Title, SortOrder::Asc) => {
                query.order((dsl::title.asc(), dsl::id.asc()))
            }
            (TaskSortField::Title, SortOrder::Desc) => {
                query.order((dsl::title.desc(), dsl::id.desc()))
            }
        };

        query
            .select(Task::as_select())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_task(
        &mut self,
        user_id: i64,
        task_id: i64,
        mut updates: UpdateTask,
    ) -> PgResult<Option<Task>> {
        use schema::tasks::{self, dsl};

        if updates.is_empty() {
            return self.find_task(user_id, task_id).await;
        }

        if let Some(title) = updates.title.as_mut() {
            *title = title.trim().to_owned();
        }
        // Some(None) clears, Some(Some(value)) sets, None skips
        updates.description = updates
            .description
            .map(|opt| opt.map(|d| d.trim().to_owned()).filter(|d| !d.is_empty()));

        diesel::update(
            tasks::table
                .filter(dsl::id.eq(task_id))
                .filter(dsl::user_id.eq(user_id)),
        )
        .set(&updates)
        .returning(Task::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)
    }

    async fn set_task_completed(
        &mut self,
        user_id: i64,
        task_id: i64,
        is_completed: bool,
    ) -> PgResult<Option<Task>> {
        self.update_task(user_id, task_id, UpdateTask::completion(is_completed))
            .await
    }

    async fn delete_task(&mut self, user_id: i64, task_id: i64) -> PgResult<bool> {
        use schema::tasks::{self, dsl};

        let deleted = diesel::delete(
            tasks::table
                .filter(dsl::id.eq(task_id))
                .filter(dsl::user_id.eq(user_id)),
        )
        .execute(self)
        .await
        .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
