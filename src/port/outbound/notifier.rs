//! Notifier port for operator notifications.
//!
//! Notifications carry a severity and free-text title and body. They are sent
//! by the orchestrating run loop for cycle failures, risk alerts, emergency
//! exits, executed signals and the daily report.

use std::fmt;

use async_trait::async_trait;

use crate::domain::money::Usd;
use crate::domain::position::portfolio_value;
use crate::domain::{AlertSeverity, Position, RiskAlert, Signal};

/// A notification for an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: AlertSeverity,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(level: AlertSeverity, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(AlertSeverity::Info, title, body)
    }

    pub fn critical(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(AlertSeverity::Critical, title, body)
    }

    /// Summary of signals handed to the executor.
    #[must_use]
    pub fn signals_executed(signals: &[Signal]) -> Self {
        let body = signals
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Self::info(format!("{} signal(s) submitted", signals.len()), body)
    }

    /// Emergency exit triggered by stop-loss alerts.
    #[must_use]
    pub fn emergency_exit(alerts: &[RiskAlert]) -> Self {
        let body = alerts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Self::critical("Emergency exit triggered", body)
    }

    /// One risk alert, at the alert's own severity.
    #[must_use]
    pub fn risk_alert(alert: &RiskAlert) -> Self {
        let body = match alert.market_name() {
            Some(name) => format!("{name}: {}", alert.message()),
            None => alert.message().to_string(),
        };
        Self::new(alert.severity(), format!("Risk alert: {}", alert.category()), body)
    }

    /// Portfolio value, unrealized PnL and position count.
    #[must_use]
    pub fn daily_report(positions: &[Position]) -> Self {
        let pnl: Usd = positions.iter().map(Position::unrealized_pnl).sum();
        let sign = if pnl.is_sign_negative() { "-" } else { "+" };
        let body = format!(
            "Total value: ${:.2}\nPnL: {sign}${:.2}\nPositions: {}",
            portfolio_value(positions),
            pnl.abs(),
            positions.len()
        );
        Self::info("Daily report", body)
    }

    /// A cycle that failed before producing output.
    pub fn cycle_failed(component: &str, error: &impl fmt::Display) -> Self {
        Self::critical(format!("{component} cycle failed"), error.to_string())
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.emoji(), self.title)?;
        if !self.body.is_empty() {
            write!(f, "\n{}", self.body)?;
        }
        Ok(())
    }
}

/// Trait for notification handlers.
///
/// Notifications are fire-and-forget.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The `notify` method should not block or perform slow I/O synchronously
/// - Notifiers that deliver in the background drain their queue in `shutdown`
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Handle a notification. Must return quickly.
    fn notify(&self, notification: Notification);

    /// Deliver anything still queued and stop accepting notifications.
    async fn shutdown(&self) {}
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts notifications to all registered notifiers.
#[derive(Default)]
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

#[async_trait]
impl Notifier for NotifierRegistry {
    fn notify(&self, notification: Notification) {
        for notifier in &self.notifiers {
            notifier.notify(notification.clone());
        }
    }

    async fn shutdown(&self) {
        for notifier in &self.notifiers {
            notifier.shutdown().await;
        }
    }
}
