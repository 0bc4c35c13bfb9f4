use async_trait::async_trait;
use tracing::info;

use crate::services::notify::sink::{Notification, NotificationSink, NotifyError};

/// Sink used when no fan-out endpoint is configured: the notification only reaches the log.
#[derive(Clone, Debug, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    fn backend_name(&self) -> &'static str {
        "log"
    }

    async fn publish(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            topic = %notification.topic,
            subject = %notification.subject,
            message = %notification.message,
            "notification published"
        );
        Ok(())
    }
}
