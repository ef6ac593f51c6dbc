use tracing::{error, info, warn};

use crate::domain::AlertSeverity;
use crate::port::outbound::notifier::{Notification, Notifier};

/// Writes notifications to the log at a level matching their severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let Notification { level, title, body } = notification;
        match level {
            AlertSeverity::Info => info!(title = %title, body = %body, "Notification"),
            AlertSeverity::Warning => warn!(title = %title, body = %body, "Notification"),
            AlertSeverity::Critical => error!(title = %title, body = %body, "Notification"),
        }
    }
}
