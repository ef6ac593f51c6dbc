//! Pool scoring types.
//!
//! Pools are scored on four sub-scores, each roughly on a 0-100 scale:
//! - **Yield**: APY relative to a strategy-specific full-score APY
//! - **Risk**: inverted raw risk score (low risk scores high)
//! - **Liquidity**: TVL relative to a strategy-specific full-score TVL
//! - **Balance**: how evenly open interest is split between long and short
//!
//! Sub-scores are combined into a total with a strategy's [`ScoreWeights`].
//! A [`PoolScore`] is built in one step from its sub-scores and weights and
//! is immutable afterwards.
//!
//! # Examples
//!
//! ```
//! use gmx_allocator::domain::{Market, PoolScore, PoolStats, ScoreWeights, SubScores};
//!
//! let market = Market::new("0x1", "ETH-USDC");
//! let stats = PoolStats::new("0x1", 18.5, 0.6);
//! let sub_scores = SubScores::new(80.0, 70.0, 90.0, 85.0);
//!
//! let score = PoolScore::new(market, stats, sub_scores, &ScoreWeights::default());
//! assert!((score.total() - 81.0).abs() < 1e-9);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::id::MarketKey;
use super::market::{Market, PoolStats};

/// The four sub-scores of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SubScores {
    pub yield_score: f64,
    pub risk: f64,
    pub liquidity: f64,
    pub balance: f64,
}

impl SubScores {
    #[must_use]
    pub const fn new(yield_score: f64, risk: f64, liquidity: f64, balance: f64) -> Self {
        Self {
            yield_score,
            risk,
            liquidity,
            balance,
        }
    }

    /// Weighted sum of the sub-scores.
    ///
    /// Weights are applied as given and are not normalized.
    #[must_use]
    pub fn weighted(&self, weights: &ScoreWeights) -> f64 {
        self.yield_score * weights.yield_weight
            + self.risk * weights.risk
            + self.liquidity * weights.liquidity
            + self.balance * weights.balance
    }
}

/// Weights for combining sub-scores into a total score.
///
/// By convention the weights sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(rename = "apy")]
    pub yield_weight: f64,
    pub risk: f64,
    pub liquidity: f64,
    pub balance: f64,
}

impl ScoreWeights {
    #[must_use]
    pub const fn new(yield_weight: f64, risk: f64, liquidity: f64, balance: f64) -> Self {
        Self {
            yield_weight,
            risk,
            liquidity,
            balance,
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::new(0.30, 0.25, 0.25, 0.20)
    }
}

/// A pool's computed score with the market and stats it was computed from.
///
/// Implements `Ord` by total score for ranking.
#[derive(Debug, Clone)]
pub struct PoolScore {
    market: Market,
    stats: PoolStats,
    sub_scores: SubScores,
    total: f64,
}

impl PoolScore {
    /// Build a score, computing the total from the sub-scores and weights.
    #[must_use]
    pub fn new(
        market: Market,
        stats: PoolStats,
        sub_scores: SubScores,
        weights: &ScoreWeights,
    ) -> Self {
        let total = sub_scores.weighted(weights);
        Self {
            market,
            stats,
            sub_scores,
            total,
        }
    }

    #[must_use]
    pub const fn market_key(&self) -> &MarketKey {
        self.market.key()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.market.name()
    }

    #[must_use]
    pub const fn market(&self) -> &Market {
        &self.market
    }

    #[must_use]
    pub const fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Shorthand for the scored pool's APY.
    #[must_use]
    pub const fn apy(&self) -> f64 {
        self.stats.apy()
    }

    #[must_use]
    pub const fn sub_scores(&self) -> &SubScores {
        &self.sub_scores
    }

    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Total score mapped to a `[0, 1]` confidence.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        (self.total / 100.0).clamp(0.0, 1.0)
    }
}

impl PartialEq for PoolScore {
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total
    }
}

impl Eq for PoolScore {}

impl PartialOrd for PoolScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PoolScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total
            .partial_cmp(&other.total)
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_with(sub_scores: SubScores, weights: &ScoreWeights) -> PoolScore {
        PoolScore::new(
            Market::new("0x123", "ETH-USDC"),
            PoolStats::new("0x123", 18.5, 0.5),
            sub_scores,
            weights,
        )
    }

    #[test]
    fn test_total_with_default_weights() {
        let score = score_with(SubScores::new(80.0, 70.0, 90.0, 85.0), &ScoreWeights::default());
        assert!((score.total() - 81.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_with_custom_weights() {
        let weights = ScoreWeights::new(0.6, 0.2, 0.1, 0.1);
        let score = score_with(SubScores::new(100.0, 50.0, 50.0, 50.0), &weights);
        assert!((score.total() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_are_not_normalized() {
        let weights = ScoreWeights::new(1.0, 1.0, 0.0, 0.0);
        let score = score_with(SubScores::new(50.0, 50.0, 10.0, 10.0), &weights);
        assert!((score.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let weights = ScoreWeights::new(1.0, 0.0, 0.0, 0.0);
        let score = score_with(SubScores::new(120.0, 0.0, 0.0, 0.0), &weights);
        assert_eq!(score.confidence(), 1.0);
    }

    #[test]
    fn test_ordering_by_total() {
        let weights = ScoreWeights::default();
        let low = score_with(SubScores::new(10.0, 10.0, 10.0, 10.0), &weights);
        let high = score_with(SubScores::new(90.0, 90.0, 90.0, 90.0), &weights);
        assert!(high > low);
    }
}
