//! Tag management handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use luxlist_postgres::PgClient;
use luxlist_postgres::query::{TagRepository, TaskTagRepository};

use super::tasks::find_task;
use crate::extract::{AuthSession, Json, Path, ValidateJson};
use crate::handler::request::{CreateTag, TagPathParams, TaskPathParams, UpdateTag, UserPathParams};
use crate::handler::response::{TagResponse, Tags};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for tag operations.
const TRACING_TARGET: &str = "luxlist_server::handler::tags";

#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id()))]
async fn create_tag(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    ValidateJson(request): ValidateJson<CreateTag>,
) -> Result<(StatusCode, Json<TagResponse>)> {
    let mut conn = pg_client.get_connection().await?;
    let tag = conn
        .create_tag(request.into_model(auth_session.user_id()))
        .await?;

    tracing::info!(target: TRACING_TARGET, tag_id = tag.id, "tag created");

    Ok((StatusCode::CREATED, Json(TagResponse::from_model(tag))))
}

#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), tag_id = path_params.tag_id))]
async fn get_tag(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TagPathParams>,
) -> Result<(StatusCode, Json<TagResponse>)> {
    let mut conn = pg_client.get_connection().await?;
    let tag = conn
        .find_tag(auth_session.user_id(), path_params.tag_id)
        .await?
        .ok_or_else(tag_not_found)?;

    Ok((StatusCode::OK, Json(TagResponse::from_model(tag))))
}

/// Lists a user's tags. Only the user themself may call it.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), owner_id = path_params.user_id))]
async fn list_user_tags(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<UserPathParams>,
) -> Result<(StatusCode, Json<Tags>)> {
    auth_session.authorize_self(path_params.user_id)?;

    let mut conn = pg_client.get_connection().await?;
    let tags = conn.list_user_tags(path_params.user_id).await?;

    Ok((StatusCode::OK, Json(Tags::from_models(tags))))
}

/// Lists the tags linked to one of the caller's tasks.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), task_id = path_params.task_id))]
async fn list_task_tags(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TaskPathParams>,
) -> Result<(StatusCode, Json<Tags>)> {
    let mut conn = pg_client.get_connection().await?;
    find_task(&mut conn, auth_session.user_id(), path_params.task_id).await?;
    let tags = conn.list_task_tags(path_params.task_id).await?;

    Ok((StatusCode::OK, Json(Tags::from_models(tags))))
}

#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), tag_id = path_params.tag_id))]
async fn update_tag(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TagPathParams>,
    ValidateJson(request): ValidateJson<UpdateTag>,
) -> Result<(StatusCode, Json<TagResponse>)> {
    let mut conn = pg_client.get_connection().await?;
    let tag = conn
        .update_tag(
            auth_session.user_id(),
            path_params.tag_id,
            request.into_model(),
        )
        .await?
        .ok_or_else(tag_not_found)?;

    tracing::info!(target: TRACING_TARGET, "tag updated");

    Ok((StatusCode::OK, Json(TagResponse::from_model(tag))))
}

/// Deletes a tag, detaching it from every task.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), tag_id = path_params.tag_id))]
async fn delete_tag(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TagPathParams>,
) -> Result<StatusCode> {
    let mut conn = pg_client.get_connection().await?;
    if !conn
        .delete_tag(auth_session.user_id(), path_params.tag_id)
        .await?
    {
        return Err(tag_not_found());
    }

    tracing::info!(target: TRACING_TARGET, "tag deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn tag_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Tag not found")
        .with_resource("tag")
}

/// Returns a [`Router`] with all tag routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/tags", post(create_tag))
        .route(
            "/tags/{tagId}",
            get(get_tag).put(update_tag).delete(delete_tag),
        )
        .route("/tags/user/{userId}", get(list_user_tags))
        .route("/tags/task/{taskId}", get(list_task_tags))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::handler::test::{create_test_server, login};

    #[tokio::test]
    async fn foreign_user_tags_are_forbidden() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let cookie = login(&server, "alice").await;

        let response = server.get("/api/v1/tags/user/2").add_cookie(cookie).await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["resource"], "user");
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_invalid_color() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let cookie = login(&server, "alice").await;

        let response = server
            .post("/api/v1/tags")
            .add_cookie(cookie)
            .json(&json!({ "name": "work", "color": "red" }))
            .await;
        response.assert_status_bad_request();
        let message = response.json::<Value>()["message"].to_string();
        assert!(message.contains("color"));
        Ok(())
    }

    #[tokio::test]
    async fn tags_require_login() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/api/v1/tags/1").await;
        response.assert_status_unauthorized();
        Ok(())
    }
}
