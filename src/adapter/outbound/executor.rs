//! Executor that records submitted signals to the log.
//!
//! Deposits and withdrawals are never performed by this crate. This executor
//! is the hand-off point where an on-chain executor would be attached.

use tracing::info;

use crate::domain::Signal;
use crate::port::outbound::executor::SignalExecutor;

/// Logs each submitted signal at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingExecutor;

impl SignalExecutor for LoggingExecutor {
    fn submit(&self, signals: Vec<Signal>) {
        for signal in &signals {
            info!(
                action = %signal.action(),
                market = %signal.market_name(),
                market_key = %signal.market_key(),
                amount_usd = %signal.amount_usd(),
                priority = signal.priority(),
                reason = %signal.reason(),
                "Signal handed off"
            );
        }
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}
