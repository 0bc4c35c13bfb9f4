/*
 * Responsibility
 * - Tasks の request/response DTO
 * - create: 未指定の optional field は null, description は "" が既定
 * - update: 部分更新の入力は services::tasks::TaskPatch (tri-state) をそのまま使う
 * - id / completed は create 時に caller から受け取らない
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Task;
use crate::services::tasks::NewTask;

pub use crate::services::tasks::TaskPatch as UpdateTaskRequest;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        NewTask {
            description: req.description.unwrap_or_default(),
            due_date: req.due_date,
            priority: req.priority,
            category: req.category,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub description: String,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub completed: bool,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        TaskResponse {
            id: task.id,
            description: task.description,
            due_date: task.due_date,
            priority: task.priority,
            category: task.category,
            completed: task.completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
