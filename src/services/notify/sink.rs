//! Fan-out notification interface used after a task is created.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("publish request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("publish rejected with status {0}")]
    Rejected(u16),
    #[error("publish timed out")]
    Timeout,
}

/// A message for every subscriber of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub topic: String,
    pub subject: String,
    pub message: String,
    pub group_id: String,
    pub sent_at: DateTime<Utc>,
}

impl Notification {
    pub fn task_created(topic: &str, description: &str) -> Self {
        Self {
            topic: topic.to_string(),
            subject: "New Task Notification".to_string(),
            message: format!("A new task has been created: {description}"),
            group_id: "default".to_string(),
            sent_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn publish(&self, notification: &Notification) -> Result<(), NotifyError>;
}
