//! Collaborator doubles for engine, risk and run-loop tests.
//!
//! - [`InMemoryDataSource`]: Mutable markets, stats and positions, with an
//!   injectable failure. Clones share state, so a test can change positions
//!   between cycles.
//! - [`RecordingExecutor`]: Records every submitted batch.
//! - [`RecordingNotifier`]: Records every notification and shutdown.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::{Market, MarketKey, PoolStats, Position, Signal};
use crate::error::{DataError, Result};
use crate::port::outbound::data::PoolDataSource;
use crate::port::outbound::executor::SignalExecutor;
use crate::port::outbound::notifier::{Notification, Notifier};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct DataState {
    markets: Vec<Market>,
    stats: HashMap<MarketKey, PoolStats>,
    positions: HashMap<String, Vec<Position>>,
    failure: Option<String>,
}

/// In-memory [`PoolDataSource`].
#[derive(Clone, Default)]
pub struct InMemoryDataSource {
    state: Arc<Mutex<DataState>>,
    stats_requests: Arc<AtomicUsize>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markets(self, markets: Vec<Market>) -> Self {
        lock(&self.state).markets = markets;
        self
    }

    pub fn with_stats(self, stats: Vec<PoolStats>) -> Self {
        lock(&self.state)
            .stats
            .extend(stats.into_iter().map(|s| (s.market_key().clone(), s)));
        self
    }

    pub fn with_positions(self, address: &str, positions: Vec<Position>) -> Self {
        self.set_positions(address, positions);
        self
    }

    /// Replace the positions held by `address`.
    pub fn set_positions(&self, address: &str, positions: Vec<Position>) {
        lock(&self.state)
            .positions
            .insert(address.to_string(), positions);
    }

    /// Replace the stats of one market.
    pub fn set_stats(&self, stats: PoolStats) {
        lock(&self.state)
            .stats
            .insert(stats.market_key().clone(), stats);
    }

    /// Make every call fail with [`DataError::Unavailable`] until [`recover`](Self::recover).
    pub fn fail_with(&self, message: &str) {
        lock(&self.state).failure = Some(message.to_string());
    }

    pub fn recover(&self) {
        lock(&self.state).failure = None;
    }

    /// Number of `get_pool_stats` calls served.
    pub fn stats_requests(&self) -> usize {
        self.stats_requests.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<()> {
        match &lock(&self.state).failure {
            Some(message) => Err(DataError::Unavailable(message.clone()).into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PoolDataSource for InMemoryDataSource {
    async fn list_markets(&self) -> Result<Vec<Market>> {
        self.check_failure()?;
        Ok(lock(&self.state).markets.clone())
    }

    async fn get_pool_stats(&self, market_key: &MarketKey) -> Result<Option<PoolStats>> {
        self.check_failure()?;
        self.stats_requests.fetch_add(1, Ordering::SeqCst);
        Ok(lock(&self.state).stats.get(market_key).cloned())
    }

    async fn get_positions(&self, address: &str) -> Result<Vec<Position>> {
        self.check_failure()?;
        Ok(lock(&self.state)
            .positions
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

/// [`SignalExecutor`] that records submitted batches.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    batches: Arc<Mutex<Vec<Vec<Signal>>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submitted batches in submission order.
    pub fn batches(&self) -> Vec<Vec<Signal>> {
        lock(&self.batches).clone()
    }

    /// Every submitted signal, flattened.
    pub fn submitted(&self) -> Vec<Signal> {
        lock(&self.batches).iter().flatten().cloned().collect()
    }
}

impl SignalExecutor for RecordingExecutor {
    fn submit(&self, signals: Vec<Signal>) {
        lock(&self.batches).push(signals);
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// [`Notifier`] that records every notification.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
    shutdowns: Arc<AtomicUsize>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }

    pub fn count(&self) -> usize {
        lock(&self.notifications).len()
    }

    /// Notifications whose title matches exactly.
    pub fn titled(&self, title: &str) -> Vec<Notification> {
        lock(&self.notifications)
            .iter()
            .filter(|n| n.title == title)
            .cloned()
            .collect()
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        lock(&self.notifications).push(notification);
    }

    async fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}
