//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! - [`data::PoolDataSource`] - markets, pool stats and wallet positions
//! - [`executor::SignalExecutor`] - hands accepted signals off for execution
//! - [`notifier::Notifier`] - operator notifications

pub mod data;
pub mod executor;
pub mod notifier;
