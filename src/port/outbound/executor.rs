//! Signal execution port.

use crate::domain::Signal;

/// Accepts filtered signals and performs the deposits and withdrawals
/// out-of-band.
///
/// Submission is fire-and-forget: the caller never awaits confirmation or
/// inspects results. Implementations must not block; spawn a task for slow
/// work.
pub trait SignalExecutor: Send + Sync {
    /// Hand off signals in priority order.
    fn submit(&self, signals: Vec<Signal>);

    /// Executor name for logging.
    fn name(&self) -> &'static str;
}
