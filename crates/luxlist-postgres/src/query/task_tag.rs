//! Task/tag link repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{NewTaskTag, Tag, TaskTag};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for linking tags to tasks.
///
/// Callers verify that both ends belong to the same user before linking.
pub trait TaskTagRepository {
    /// Links a tag to a task.
    ///
    /// Linking twice fails with a `task_tags_pkey` violation.
    fn link_tag(&mut self, link: NewTaskTag) -> impl Future<Output = PgResult<TaskTag>> + Send;

    /// Removes a link. Returns `false` if the link did not exist.
    fn unlink_tag(
        &mut self,
        task_id: i64,
        tag_id: i64,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists the tags linked to a task, ordered by name.
    fn list_task_tags(&mut self, task_id: i64) -> impl Future<Output = PgResult<Vec<Tag>>> + Send;
}

impl TaskTagRepository for PgConnection {
    async fn link_tag(&mut self, link: NewTaskTag) -> PgResult<TaskTag> {
        use schema::task_tags;

        diesel::insert_into(task_tags::table)
            .values(&link)
            .returning(TaskTag::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn unlink_tag(&mut self, task_id: i64, tag_id: i64) -> PgResult<bool> {
        use schema::task_tags::{self, dsl};

        let deleted = diesel::delete(
            task_tags::table
                .filter(dsl::task_id.eq(task_id))
                .filter(dsl::tag_id.eq(tag_id)),
        )
        .execute(self)
        .await
        .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    async fn list_task_tags(&mut self, task_id: i64) -> PgResult<Vec<Tag>> {
        use schema::{tags, task_tags};

        task_tags::table
            .inner_join(tags::table)
            .filter(task_tags::task_id.eq(task_id))
            .order((tags::name.asc(), tags::id.asc()))
            .select(Tag::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
