//! Telegram notifications.
//!
//! Sends operator notifications to a single chat through a background
//! worker.

mod format;

pub mod notifier;

pub use notifier::{TelegramConfig, TelegramNotifier};
