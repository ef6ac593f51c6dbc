//! GMX Allocator - capital allocation and risk monitoring for GM liquidity pools.
//!
//! Given a set of yield-bearing pools, their yield statistics and the holder's
//! current positions, the crate decides where to deposit and withdraw capital,
//! and independently watches the holdings for loss, imbalance, low yield and
//! concentration.
//!
//! # Architecture
//!
//! - [`domain`] - Markets, pool stats, positions, scores, signals and alerts
//! - [`port`] - Collaborator traits: pool data, signal executor, notifier
//! - [`application::strategy`] - Scoring, the `balanced` and `high_yield`
//!   strategies, risk-limit filtering and the [`StrategyEngine`]
//! - [`application::risk`] - The [`RiskManager`] and portfolio summaries
//! - [`adapter`] - JSON snapshot data source, logging executor, notifiers
//! - [`app`] - Configuration and the [`app::Allocator`] run loop
//! - [`cli`] - Command-line front-end
//!
//! # Features
//!
//! - `telegram` - Telegram notifications (default)
//! - `testkit` - Builders and recording collaborators for tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gmx_allocator::adapter::outbound::executor::LoggingExecutor;
//! use gmx_allocator::adapter::outbound::snapshot::SnapshotDataSource;
//! use gmx_allocator::application::strategy::{StrategyEngine, StrategySettings};
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> gmx_allocator::error::Result<()> {
//! let data = Arc::new(SnapshotDataSource::from_path("data/snapshot.json")?);
//! let mut engine = StrategyEngine::from_name(
//!     "balanced",
//!     StrategySettings::default(),
//!     data,
//!     Arc::new(LoggingExecutor),
//! )?;
//! let signals = engine.run(dec!(1000), true).await?;
//! println!("{} signals", signals.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`StrategyEngine`]: application::strategy::StrategyEngine
//! [`RiskManager`]: application::risk::RiskManager

pub mod adapter;
pub mod app;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
