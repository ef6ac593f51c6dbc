//! Pool data port.

use async_trait::async_trait;

use crate::domain::{Market, MarketKey, PoolStats, Position};
use crate::error::Result;

/// Source of market, pool and position data.
///
/// # Implementation Notes
///
/// - Asking for stats on an unknown market returns `Ok(None)`, not an error
/// - A wallet with no holdings returns an empty list
/// - Timeouts and retries are the implementation's concern; the core
///   performs neither
#[async_trait]
pub trait PoolDataSource: Send + Sync {
    /// List all known markets.
    async fn list_markets(&self) -> Result<Vec<Market>>;

    /// Current yield statistics for one market, if available.
    async fn get_pool_stats(&self, market_key: &MarketKey) -> Result<Option<PoolStats>>;

    /// Positions held by a wallet address.
    async fn get_positions(&self, address: &str) -> Result<Vec<Position>>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}
