//! Task management handlers.
//!
//! Every route acts on the caller's own tasks. A task owned by another user
//! answers exactly like a missing one.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use luxlist_postgres::model::{self, NewTaskTag};
use luxlist_postgres::query::{TagRepository, TaskRepository, TaskTagRepository};
use luxlist_postgres::{PgClient, PgConn};

use crate::extract::{AuthSession, Json, Path, Query, ValidateJson};
use crate::handler::request::{CreateTask, ListTasks, TaskPathParams, TaskTagPathParams, UpdateTask};
use crate::handler::response::{Message, TaskResponse, TasksPage};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for task operations.
const TRACING_TARGET: &str = "luxlist_server::handler::tasks";

/// Lists the caller's tasks, filtered, sorted and paginated.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id()))]
async fn list_tasks(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Query(query): Query<ListTasks>,
) -> Result<(StatusCode, Json<TasksPage>)> {
    let filter = query.filter()?;
    let pagination = query.pagination();

    let mut conn = pg_client.get_connection().await?;
    let tasks = conn
        .list_tasks(auth_session.user_id(), &filter, query.sort_by(), pagination)
        .await?;

    tracing::debug!(target: TRACING_TARGET, count = tasks.len(), "tasks listed");

    Ok((StatusCode::OK, Json(TasksPage::from_models(tasks, pagination))))
}

/// Creates a task owned by the caller.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id()))]
async fn create_task(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    ValidateJson(request): ValidateJson<CreateTask>,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    let mut conn = pg_client.get_connection().await?;
    let task = conn
        .create_task(request.into_model(auth_session.user_id()))
        .await?;

    tracing::info!(target: TRACING_TARGET, task_id = task.id, "task created");

    Ok((StatusCode::CREATED, Json(TaskResponse::from_model(task))))
}

/// Returns a single task.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), task_id = path_params.task_id))]
async fn get_task(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TaskPathParams>,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    let mut conn = pg_client.get_connection().await?;
    let task = find_task(&mut conn, auth_session.user_id(), path_params.task_id).await?;

    Ok((StatusCode::OK, Json(TaskResponse::from_model(task))))
}

/// Applies a partial update to a task.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), task_id = path_params.task_id))]
async fn update_task(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TaskPathParams>,
    ValidateJson(request): ValidateJson<UpdateTask>,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    let mut conn = pg_client.get_connection().await?;
    let task = conn
        .update_task(
            auth_session.user_id(),
            path_params.task_id,
            request.into_model(),
        )
        .await?
        .ok_or_else(task_not_found)?;

    tracing::info!(target: TRACING_TARGET, "task updated");

    Ok((StatusCode::OK, Json(TaskResponse::from_model(task))))
}

/// Marks a task as completed.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), task_id = path_params.task_id))]
async fn complete_task(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TaskPathParams>,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    set_completed(&pg_client, &auth_session, path_params.task_id, true).await
}

/// Marks a task as not completed.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), task_id = path_params.task_id))]
async fn reopen_task(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TaskPathParams>,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    set_completed(&pg_client, &auth_session, path_params.task_id, false).await
}

/// Deletes a task together with its tag links.
#[tracing::instrument(skip_all, fields(user_id = auth_session.user_id(), task_id = path_params.task_id))]
async fn delete_task(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TaskPathParams>,
) -> Result<StatusCode> {
    let mut conn = pg_client.get_connection().await?;
    if !conn
        .delete_task(auth_session.user_id(), path_params.task_id)
        .await?
    {
        return Err(task_not_found());
    }

    tracing::info!(target: TRACING_TARGET, "task deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Attaches one of the caller's tags to one of their tasks.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = auth_session.user_id(),
        task_id = path_params.task_id,
        tag_id = path_params.tag_id,
    )
)]
async fn link_tag(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TaskTagPathParams>,
) -> Result<(StatusCode, Json<Message>)> {
    let user_id = auth_session.user_id();
    let mut conn = pg_client.get_connection().await?;

    find_task(&mut conn, user_id, path_params.task_id).await?;
    conn.find_tag(user_id, path_params.tag_id)
        .await?
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("Tag not found")
                .with_resource("tag")
        })?;

    conn.link_tag(NewTaskTag {
        task_id: path_params.task_id,
        tag_id: path_params.tag_id,
    })
    .await?;

    tracing::info!(target: TRACING_TARGET, "tag linked to task");

    Ok((StatusCode::CREATED, Json(Message::new("Tag linked to task"))))
}

/// Detaches a tag from one of the caller's tasks.
#[tracing::instrument(
    skip_all,
    fields(
        user_id = auth_session.user_id(),
        task_id = path_params.task_id,
        tag_id = path_params.tag_id,
    )
)]
async fn unlink_tag(
    State(pg_client): State<PgClient>,
    auth_session: AuthSession,
    Path(path_params): Path<TaskTagPathParams>,
) -> Result<(StatusCode, Json<Message>)> {
    let mut conn = pg_client.get_connection().await?;
    find_task(&mut conn, auth_session.user_id(), path_params.task_id).await?;

    if !conn
        .unlink_tag(path_params.task_id, path_params.tag_id)
        .await?
    {
        return Err(ErrorKind::NotFound
            .with_message("Tag is not linked to the task")
            .with_resource("tag"));
    }

    tracing::info!(target: TRACING_TARGET, "tag unlinked from task");

    Ok((StatusCode::OK, Json(Message::new("Tag unlinked from task"))))
}

async fn set_completed(
    pg_client: &PgClient,
    auth_session: &AuthSession,
    task_id: i64,
    is_completed: bool,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    let mut conn = pg_client.get_connection().await?;
    let task = conn
        .set_task_completed(auth_session.user_id(), task_id, is_completed)
        .await?
        .ok_or_else(task_not_found)?;

    tracing::info!(target: TRACING_TARGET, is_completed, "task completion changed");

    Ok((StatusCode::OK, Json(TaskResponse::from_model(task))))
}

/// Finds a task owned by `user_id` or returns 404.
pub(super) async fn find_task(
    conn: &mut PgConn,
    user_id: i64,
    task_id: i64,
) -> Result<model::Task> {
    conn.find_task(user_id, task_id)
        .await?
        .ok_or_else(task_not_found)
}

fn task_not_found() -> crate::handler::Error<'static> {
    ErrorKind::NotFound
        .with_message("Task not found")
        .with_resource("task")
}

/// Returns a [`Router`] with all task routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{taskId}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/{taskId}/complete", patch(complete_task))
        .route("/tasks/{taskId}/incomplete", patch(reopen_task))
        .route(
            "/tasks/{taskId}/tags/{tagId}",
            post(link_tag).delete(unlink_tag),
        )
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::handler::test::{create_test_server, login};

    #[tokio::test]
    async fn tasks_require_login() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/api/v1/tasks").await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "login_required");

        let response = server.patch("/api/v1/tasks/1/complete").await;
        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_blank_title() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let cookie = login(&server, "alice").await;

        let response = server
            .post("/api/v1/tasks")
            .add_cookie(cookie)
            .json(&json!({ "title": " ", "dueDate": "2026-01-01T00:00:00Z" }))
            .await;
        response.assert_status_bad_request();
        let message = response.json::<Value>()["message"].to_string();
        assert!(message.contains("title"));
        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_task_id_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let cookie = login(&server, "alice").await;

        let response = server.get("/api/v1/tasks/abc").add_cookie(cookie).await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["name"], "bad_request");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_due_date_filter_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let cookie = login(&server, "alice").await;

        let response = server
            .get("/api/v1/tasks")
            .add_query_param("due_date", "not-a-date")
            .add_cookie(cookie)
            .await;
        response.assert_status_bad_request();
        Ok(())
    }
}
