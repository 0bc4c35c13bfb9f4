use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::services::notify::sink::{Notification, NotificationSink, NotifyError};

/// Publishes notifications as JSON to an HTTP fan-out endpoint.
#[derive(Clone, Debug)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: Url,
}

impl WebhookSink {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    fn backend_name(&self) -> &'static str {
        "webhook"
    }

    async fn publish(&self, notification: &Notification) -> Result<(), NotifyError> {
        let res = self
            .client
            .post(self.url.clone())
            .json(notification)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(NotifyError::Rejected(res.status().as_u16()));
        }
        Ok(())
    }
}
