//! Notification adapters.
//!
//! Implements the `port::outbound::notifier::Notifier` trait for the log and,
//! with the `telegram` feature, a Telegram chat.

mod log;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use log::LogNotifier;
