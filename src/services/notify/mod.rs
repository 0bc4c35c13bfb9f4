pub mod log_sink;
pub mod sink;
pub mod webhook;

pub use log_sink::LogSink;
pub use sink::{Notification, NotificationSink, NotifyError};
pub use webhook::WebhookSink;
