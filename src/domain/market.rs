//! Market-related domain types.
//!
//! - [`Market`] - A GM liquidity pool with its open interest and TVL
//! - [`PoolStats`] - Yield metrics for one pool, fetched fresh each cycle
//! - [`RiskScoreParams`] - Penalties feeding the raw 0-10 pool risk score

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::MarketKey;
use super::money::{self, Usd};

/// A liquidity pool pairing a long and a short collateral token.
///
/// Constructed once per fetch and never mutated afterwards. Derived values
/// (`gm_price`, `oi_imbalance`) are computed on access from the stored fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    market_key: MarketKey,
    name: String,
    #[serde(default)]
    index_token: String,
    #[serde(default)]
    long_token: String,
    #[serde(default)]
    short_token: String,
    #[serde(default)]
    pool_tvl: Usd,
    #[serde(default)]
    gm_supply: Decimal,
    #[serde(default)]
    long_oi: Usd,
    #[serde(default)]
    short_oi: Usd,
}

impl Market {
    /// Create a market with no liquidity or open interest.
    pub fn new(market_key: impl Into<MarketKey>, name: impl Into<String>) -> Self {
        Self {
            market_key: market_key.into(),
            name: name.into(),
            index_token: String::new(),
            long_token: String::new(),
            short_token: String::new(),
            pool_tvl: Decimal::ZERO,
            gm_supply: Decimal::ZERO,
            long_oi: Decimal::ZERO,
            short_oi: Decimal::ZERO,
        }
    }

    /// Set the index, long and short token addresses.
    #[must_use]
    pub fn with_tokens(
        mut self,
        index_token: impl Into<String>,
        long_token: impl Into<String>,
        short_token: impl Into<String>,
    ) -> Self {
        self.index_token = index_token.into();
        self.long_token = long_token.into();
        self.short_token = short_token.into();
        self
    }

    /// Set the pool's total value locked.
    #[must_use]
    pub fn with_tvl(mut self, pool_tvl: Usd) -> Self {
        self.pool_tvl = pool_tvl;
        self
    }

    /// Set the outstanding GM token supply.
    #[must_use]
    pub fn with_gm_supply(mut self, gm_supply: Decimal) -> Self {
        self.gm_supply = gm_supply;
        self
    }

    /// Set long and short open interest.
    #[must_use]
    pub fn with_open_interest(mut self, long_oi: Usd, short_oi: Usd) -> Self {
        self.long_oi = long_oi;
        self.short_oi = short_oi;
        self
    }

    #[must_use]
    pub const fn key(&self) -> &MarketKey {
        &self.market_key
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn index_token(&self) -> &str {
        &self.index_token
    }

    #[must_use]
    pub fn long_token(&self) -> &str {
        &self.long_token
    }

    #[must_use]
    pub fn short_token(&self) -> &str {
        &self.short_token
    }

    #[must_use]
    pub const fn pool_tvl(&self) -> Usd {
        self.pool_tvl
    }

    #[must_use]
    pub const fn long_oi(&self) -> Usd {
        self.long_oi
    }

    #[must_use]
    pub const fn short_oi(&self) -> Usd {
        self.short_oi
    }

    /// Price of one GM token: pool TVL over GM supply, zero with no supply.
    #[must_use]
    pub fn gm_price(&self) -> Usd {
        if self.gm_supply <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.pool_tvl / self.gm_supply
    }

    /// Directional skew of open interest, always in `[0, 1]`.
    ///
    /// `|long - short| / (long + short)`, or zero when there is no open interest.
    #[must_use]
    pub fn oi_imbalance(&self) -> f64 {
        let total = self.long_oi + self.short_oi;
        if total <= Decimal::ZERO {
            return 0.0;
        }
        let skew = (self.long_oi - self.short_oi).abs() / total;
        money::to_f64(skew).clamp(0.0, 1.0)
    }

    /// True when long open interest exceeds short open interest.
    #[must_use]
    pub fn is_long_heavy(&self) -> bool {
        self.long_oi > self.short_oi
    }
}

/// Penalties that make up a pool's raw risk score.
///
/// The raw score starts at `base` and accumulates penalties, then is clamped
/// to `[0, 10]`. Higher is riskier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskScoreParams {
    pub base: f64,
    /// Multiplied by the OI imbalance (0-1).
    pub imbalance_penalty: f64,
    /// Pools with TVL below this are considered thin.
    pub low_tvl_usd: Usd,
    pub low_tvl_penalty: f64,
    /// Utilization ratio (0-1) above which a pool is considered stretched.
    pub high_utilization: f64,
    pub high_utilization_penalty: f64,
    /// APY (percent) above which yield is treated as unsustainable.
    pub unsustainable_apy: f64,
    pub unsustainable_apy_penalty: f64,
}

impl Default for RiskScoreParams {
    fn default() -> Self {
        Self {
            base: 5.0,
            imbalance_penalty: 3.0,
            low_tvl_usd: Decimal::from(1_000_000),
            low_tvl_penalty: 1.5,
            high_utilization: 0.8,
            high_utilization_penalty: 1.0,
            unsustainable_apy: 50.0,
            unsustainable_apy_penalty: 1.5,
        }
    }
}

/// Yield statistics for one pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolStats {
    market_key: MarketKey,
    /// Annualized yield in percent (18.5 means 18.5%).
    #[serde(default)]
    apy: f64,
    /// Pool utilization ratio in `[0, 1]`.
    #[serde(default)]
    utilization: f64,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl PoolStats {
    /// Create stats stamped with the current time.
    pub fn new(market_key: impl Into<MarketKey>, apy: f64, utilization: f64) -> Self {
        Self {
            market_key: market_key.into(),
            apy,
            utilization,
            updated_at: Utc::now(),
        }
    }

    /// Override the observation timestamp.
    #[must_use]
    pub fn at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    #[must_use]
    pub const fn market_key(&self) -> &MarketKey {
        &self.market_key
    }

    #[must_use]
    pub const fn apy(&self) -> f64 {
        self.apy
    }

    #[must_use]
    pub const fn utilization(&self) -> f64 {
        self.utilization
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Raw risk score of this pool in `[0, 10]`.
    #[must_use]
    pub fn risk_score(&self, market: &Market, params: &RiskScoreParams) -> f64 {
        let mut score = params.base;

        score += market.oi_imbalance() * params.imbalance_penalty;

        if market.pool_tvl() < params.low_tvl_usd {
            score += params.low_tvl_penalty;
        }
        if self.utilization > params.high_utilization {
            score += params.high_utilization_penalty;
        }
        if self.apy > params.unsustainable_apy {
            score += params.unsustainable_apy_penalty;
        }

        score.clamp(0.0, 10.0)
    }
}
