//! Outbound adapters (driven side).

pub mod executor;
pub mod notifier;
pub mod snapshot;
