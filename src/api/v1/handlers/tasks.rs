/*
 * Responsibility
 * - /tasks 系 handler (list は認証なし, create/update/delete は access middleware 経由)
 * - Json/Path を extractor で受け、service 呼び出し → DTO へ変換
 * - store / 検証の詳細は AppError に畳んでから返す
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::tasks::{CreateTaskRequest, MessageResponse, TaskResponse, UpdateTaskRequest},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    services::tasks::build_update,
    state::AppState,
};

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(v)| v).map_err(|rejection| {
        debug!(error = %rejection, "unreadable request body");
        AppError::bad_request("INVALID_JSON", "request body must be a JSON object")
    })
}

// Ids are server-generated UUIDs; anything else can never match a stored task.
fn parse_task_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, AppError> {
    let tasks = state.tasks.list().await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

pub async fn create_task(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    let req = json_body(body)?;

    let task = state.tasks.create(req.into()).await?;
    debug!(
        task_id = %task.id,
        sub = auth.subject(),
        token_exp = ?auth.claims.expires_at(),
        "create_task"
    );

    Ok((StatusCode::CREATED, Json(task.into())))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let patch = json_body(body)?;

    let instruction = build_update(&patch).ok_or_else(|| {
        AppError::bad_request("NO_UPDATE_FIELDS", "No update parameters provided")
    })?;

    let id = parse_task_id(&task_id).ok_or_else(|| AppError::not_found("task"))?;
    state.tasks.update(id, &instruction).await?;

    Ok(Json(MessageResponse {
        message: "Task updated successfully",
    }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    // idempotent: an id that cannot exist is already deleted
    if let Some(id) = parse_task_id(&task_id) {
        state.tasks.delete(id).await?;
    }

    Ok(Json(MessageResponse {
        message: "Task deleted successfully",
    }))
}
