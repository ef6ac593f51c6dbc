//! Allocation strategies and the engine that runs them.
//!
//! A [`Strategy`] turns markets, pool stats and current positions into an
//! ordered list of [`Signal`]s. Two variants ship with the crate:
//!
//! - [`balanced::BalancedStrategy`]: score-weighted spread across several
//!   pools, trims overweight holdings
//! - [`high_yield::HighYieldStrategy`]: concentrates on the top-APY pool and
//!   switches when a much better yield appears
//!
//! Variants are created by name through [`registry::StrategyRegistry`] and
//! driven by [`engine::StrategyEngine`].

pub mod balanced;
pub mod engine;
pub mod filter;
pub mod high_yield;
pub mod limits;
mod passes;
pub mod registry;
pub mod scoring;

use std::collections::HashMap;

use crate::domain::money::Usd;
use crate::domain::{Market, MarketKey, PoolScore, PoolStats, Position, RiskScoreParams, Signal};

pub use engine::{EngineStatus, PoolRanking, StrategyEngine};
pub use filter::PoolFilter;
pub use limits::{RiskCheckResult, RiskLimits};
pub use registry::StrategyRegistry;
pub use scoring::ScoringProfile;

/// Pool stats keyed by market.
pub type StatsByKey = HashMap<MarketKey, PoolStats>;

/// Parameters shared by all strategy variants.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySettings {
    /// Pools yielding less than this APY (percent) are not entered and are exited.
    pub min_apy: f64,
    /// Most pools a single allocation pass spreads capital across.
    pub max_pools: usize,
    /// Allowed deviation (percentage points) from target share before trimming.
    pub rebalance_threshold: f64,
    /// Best APY must exceed a held pool's APY by this factor to switch.
    pub switch_apy_multiplier: f64,
    pub limits: RiskLimits,
    pub filter: PoolFilter,
    pub risk_score: RiskScoreParams,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            min_apy: 10.0,
            max_pools: 5,
            rebalance_threshold: 5.0,
            switch_apy_multiplier: 1.5,
            limits: RiskLimits::default(),
            filter: PoolFilter::default(),
            risk_score: RiskScoreParams::default(),
        }
    }
}

/// A named allocation policy.
///
/// Implementations supply a scoring profile and a signal generator; filtering,
/// scoring and risk-limit checks have shared default implementations.
pub trait Strategy: Send + Sync {
    /// Registry name, e.g. `"balanced"`.
    fn name(&self) -> &'static str;

    /// One-line human description.
    fn description(&self) -> &'static str;

    fn settings(&self) -> &StrategySettings;

    fn profile(&self) -> &ScoringProfile;

    /// Produce signals sorted by ascending priority.
    ///
    /// Deterministic for identical inputs.
    fn generate_signals(
        &self,
        markets: &[Market],
        stats: &StatsByKey,
        positions: &[Position],
        available_capital: Usd,
    ) -> Vec<Signal>;

    fn score_pool(&self, market: &Market, stats: &PoolStats) -> PoolScore {
        self.profile()
            .score(market, stats, &self.settings().risk_score)
    }

    fn filter_pools<'a>(&self, markets: &'a [Market]) -> Vec<&'a Market> {
        self.settings().filter.apply(markets)
    }

    /// Score every filtered market that has stats, in market order.
    fn score_candidates(&self, markets: &[Market], stats: &StatsByKey) -> Vec<PoolScore> {
        self.filter_pools(markets)
            .into_iter()
            .filter_map(|market| {
                stats
                    .get(market.key())
                    .map(|pool_stats| self.score_pool(market, pool_stats))
            })
            .collect()
    }

    fn check_risk_limits(&self, signal: &Signal, positions: &[Position]) -> RiskCheckResult {
        self.settings().limits.check(signal, positions)
    }
}
