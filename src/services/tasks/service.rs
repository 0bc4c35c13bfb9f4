use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::{Task, UpdateInstruction};
use crate::repos::{StoreError, TaskStore};
use crate::services::notify::{Notification, NotificationSink, NotifyError};

/// Fields accepted at creation; `id` and `completed` are never caller-supplied.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub description: String,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
}

/// Orchestrates store writes and the creation fan-out.
///
/// - Every store and sink call is bounded by `timeout`.
/// - A failed publish never undoes a persisted task.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    sink: Arc<dyn NotificationSink>,
    topic: String,
    timeout: Duration,
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskService")
            .field("store", &self.store.backend_name())
            .field("sink", &self.sink.backend_name())
            .field("topic", &self.topic)
            .finish()
    }
}

impl TaskService {
    pub fn new(
        store: Arc<dyn TaskStore>,
        sink: Arc<dyn NotificationSink>,
        topic: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            sink,
            topic: topic.into(),
            timeout,
        }
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        let res = match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(StoreError::Unavailable),
        };

        if let Err(err) = &res
            && !matches!(err, StoreError::NotFound)
        {
            error!(op, backend = self.store.backend_name(), error = %err, "store call failed");
        }
        res
    }

    pub async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.bounded("scan", self.store.scan()).await
    }

    pub async fn create(&self, new: NewTask) -> Result<Task, StoreError> {
        let task = Task::new(new.description, new.due_date, new.priority, new.category);
        self.bounded("put", self.store.put(&task)).await?;

        info!(task_id = %task.id, "task created");

        let notification = Notification::task_created(&self.topic, &task.description);
        if let Err(err) = self.publish(&notification).await {
            warn!(task_id = %task.id, error = %err, "task notification dropped");
        }

        Ok(task)
    }

    async fn publish(&self, notification: &Notification) -> Result<(), NotifyError> {
        tokio::time::timeout(self.timeout, self.sink.publish(notification))
            .await
            .map_err(|_| NotifyError::Timeout)?
    }

    pub async fn update(&self, id: Uuid, instruction: &UpdateInstruction) -> Result<(), StoreError> {
        self.bounded("update", self.store.update(id, instruction))
            .await?;

        let fields: Vec<&str> = instruction.fields().into_iter().map(|f| f.name()).collect();
        info!(task_id = %id, ?fields, "task updated");
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.bounded("delete", self.store.delete(id)).await?;

        info!(task_id = %id, "task deleted");
        Ok(())
    }
}
