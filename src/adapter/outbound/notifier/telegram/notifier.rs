//! Telegram notifier.
//!
//! Provides the [`TelegramNotifier`], which queues notifications on a channel
//! and delivers them from a background worker.
//!
//! Requires the `telegram` feature to be enabled.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::port::outbound::notifier::{Notification, Notifier};

use super::format::format_notification;

/// Configuration for the Telegram notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID for notifications.
    pub chat_id: i64,
    /// Send info-level notifications such as submitted signals.
    pub notify_info: bool,
}

/// Upper bound on draining queued messages at shutdown.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Telegram notifier that sends messages to a chat.
///
/// Messages queued before [`Notifier::shutdown`] are delivered before it
/// returns; later ones are dropped with a warning.
pub struct TelegramNotifier {
    sender: Mutex<Option<mpsc::UnboundedSender<Notification>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl TelegramNotifier {
    /// Create a notifier and spawn its delivery worker.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(telegram_worker(config, receiver));
        Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn notify(&self, notification: Notification) {
        let sent = lock(&self.sender)
            .as_ref()
            .is_some_and(|sender| sender.send(notification).is_ok());
        if !sent {
            warn!("Telegram notifier channel closed");
        }
    }

    async fn shutdown(&self) {
        // Closing the channel lets the worker finish the queue and exit.
        drop(lock(&self.sender).take());
        let worker = lock(&self.worker).take();
        let Some(worker) = worker else {
            return;
        };

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, worker).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, "Telegram notifier worker failed"),
            Err(_) => warn!(
                timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
                "Telegram notifier did not drain before timeout"
            ),
        }
    }
}

/// Background worker that sends Telegram messages.
async fn telegram_worker(
    config: TelegramConfig,
    mut receiver: mpsc::UnboundedReceiver<Notification>,
) {
    let bot = Bot::new(&config.bot_token);
    let chat_id = ChatId(config.chat_id);

    info!(chat_id = config.chat_id, "Telegram notifier started");

    while let Some(notification) = receiver.recv().await {
        let Some(text) = format_notification(&notification, &config) else {
            continue;
        };

        if let Err(e) = bot
            .send_message(chat_id, &text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
        {
            error!(error = %e, "Failed to send Telegram message");
        }
    }

    warn!("Telegram notifier worker shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> TelegramConfig {
        TelegramConfig {
            bot_token: "123:fake".into(),
            chat_id: 1,
            notify_info: false,
        }
    }

    #[tokio::test]
    async fn test_notify_after_worker_start_does_not_block() {
        let notifier = TelegramNotifier::new(quiet_config());
        notifier.notify(Notification::info("skipped", ""));
        notifier.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_worker() {
        let notifier = TelegramNotifier::new(quiet_config());
        notifier.notify(Notification::info("skipped", ""));

        notifier.shutdown().await;

        assert!(lock(&notifier.sender).is_none());
        assert!(lock(&notifier.worker).is_none());
    }

    #[tokio::test]
    async fn test_shutdown_twice_and_notify_after_is_harmless() {
        let notifier = TelegramNotifier::new(quiet_config());

        notifier.shutdown().await;
        notifier.shutdown().await;
        notifier.notify(Notification::critical("late", "dropped"));
    }
}
