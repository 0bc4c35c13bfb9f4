/*
 * Responsibility
 * - URL 構造を定義
 * - GET / と GET /tasks は公開, 書き込み系は access middleware (bearer token) の内側
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::api::v1::handlers::{
    health::health,
    tasks::{create_task, delete_task, list_tasks, update_task},
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_tasks))
        .route("/health", get(health))
        .route("/tasks", get(list_tasks));

    let protected = Router::new()
        .route("/tasks", post(create_task))
        .route("/tasks/{task_id}", put(update_task).delete(delete_task));

    public.merge(access::apply(protected, state))
}
