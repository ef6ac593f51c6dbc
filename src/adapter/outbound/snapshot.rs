//! JSON snapshot data source.
//!
//! Serves markets, pool stats and positions from a file captured ahead of
//! time, so the allocator can run offline.
//!
//! ```json
//! {
//!   "markets": [{ "market_key": "0x70d9...", "name": "ETH-USDC", "pool_tvl": "25000000" }],
//!   "stats": [{ "market_key": "0x70d9...", "apy": 18.5, "utilization": 0.55 }],
//!   "positions": { "0xabc...": [{ "market_key": "0x70d9...", "value_usd": "1200" }] }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Market, MarketKey, PoolStats, Position};
use crate::error::{DataError, Result};
use crate::port::outbound::data::PoolDataSource;

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    markets: Vec<Market>,
    #[serde(default)]
    stats: Vec<PoolStats>,
    #[serde(default)]
    positions: HashMap<String, Vec<Position>>,
}

/// Data source backed by an in-memory snapshot.
///
/// Wallet addresses are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct SnapshotDataSource {
    markets: Vec<Market>,
    stats: HashMap<MarketKey, PoolStats>,
    positions: HashMap<String, Vec<Position>>,
}

impl SnapshotDataSource {
    /// Load a snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DataError::Unavailable(format!("cannot read snapshot {}: {e}", path.display()))
        })?;
        let source = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            markets = source.markets.len(),
            stats = source.stats.len(),
            wallets = source.positions.len(),
            "Snapshot loaded"
        );
        Ok(source)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(content)
            .map_err(|e| DataError::Malformed(format!("invalid snapshot: {e}")))?;

        let stats = file
            .stats
            .into_iter()
            .map(|s| (s.market_key().clone(), s))
            .collect();
        let positions = file
            .positions
            .into_iter()
            .map(|(address, held)| (address.to_lowercase(), held))
            .collect();

        Ok(Self {
            markets: file.markets,
            stats,
            positions,
        })
    }

    #[must_use]
    pub fn market_count(&self) -> usize {
        self.markets.len()
    }
}

#[async_trait]
impl PoolDataSource for SnapshotDataSource {
    async fn list_markets(&self) -> Result<Vec<Market>> {
        Ok(self.markets.clone())
    }

    async fn get_pool_stats(&self, market_key: &MarketKey) -> Result<Option<PoolStats>> {
        Ok(self.stats.get(market_key).cloned())
    }

    async fn get_positions(&self, address: &str) -> Result<Vec<Position>> {
        Ok(self
            .positions
            .get(&address.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "snapshot"
    }
}
