//! Tag repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{NewTag, Tag, UpdateTag};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for tag database operations.
pub trait TagRepository {
    /// Creates a new tag.
    fn create_tag(&mut self, new_tag: NewTag) -> impl Future<Output = PgResult<Tag>> + Send;

    /// Finds a tag owned by `user_id`.
    fn find_tag(
        &mut self,
        user_id: i64,
        tag_id: i64,
    ) -> impl Future<Output = PgResult<Option<Tag>>> + Send;

    /// Lists every tag owned by `user_id`, ordered by name.
    fn list_user_tags(&mut self, user_id: i64)
    -> impl Future<Output = PgResult<Vec<Tag>>> + Send;

    /// Applies a partial update to a tag. An empty update is a no-op.
    fn update_tag(
        &mut self,
        user_id: i64,
        tag_id: i64,
        updates: UpdateTag,
    ) -> impl Future<Output = PgResult<Option<Tag>>> + Send;

    /// Deletes a tag and unlinks it from every task.
    fn delete_tag(&mut self, user_id: i64, tag_id: i64)
    -> impl Future<Output = PgResult<bool>> + Send;
}

impl TagRepository for PgConnection {
    async fn create_tag(&mut self, mut new_tag: NewTag) -> PgResult<Tag> {
        use schema::tags;

        new_tag.name = new_tag.name.trim().to_owned();

        diesel::insert_into(tags::table)
            .values(&new_tag)
            .returning(Tag::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_tag(&mut self, user_id: i64, tag_id: i64) -> PgResult<Option<Tag>> {
        use schema::tags::{self, dsl};

        tags::table
            .filter(dsl::id.eq(tag_id))
            .filter(dsl::user_id.eq(user_id))
            .select(Tag::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_user_tags(&mut self, user_id: i64) -> PgResult<Vec<Tag>> {
        use schema::tags::{self, dsl};

        tags::table
            .filter(dsl::user_id.eq(user_id))
            .order((dsl::name.asc(), dsl::id.asc()))
            .select(Tag::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_tag(
        &mut self,
        user_id: i64,
        tag_id: i64,
        mut updates: UpdateTag,
    ) -> PgResult<Option<Tag>> {
        use schema::tags::{self, dsl};

        if updates.is_empty() {
            return self.find_tag(user_id, tag_id).await;
        }

        if let Some(name) = updates.name.as_mut() {
            *name = name.trim().to_owned();
        }

        diesel::update(
            tags::table
                .filter(dsl::id.eq(tag_id))
                .filter(dsl::user_id.eq(user_id)),
        )
        .set(&updates)
        .returning(Tag::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)
    }

    async fn delete_tag(&mut self, user_id: i64, tag_id: i64) -> PgResult<bool> {
        use schema::tags::{self, dsl};

        let deleted = diesel::delete(
            tags::table
                .filter(dsl::id.eq(tag_id))
                .filter(dsl::user_id.eq(user_id)),
        )
        .execute(self)
        .await
        .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
