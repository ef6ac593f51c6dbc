//! Pool scoring.
//!
//! A [`ScoringProfile`] holds the variant-specific knobs: sub-score weights,
//! the APY that earns a full yield score, the cap on the yield score, and the
//! TVL that earns a full liquidity score. Scoring is pure and never fails;
//! zero or missing inputs degrade to zero sub-scores.

use rust_decimal::Decimal;

use crate::domain::money::{self, Usd};
use crate::domain::{Market, PoolScore, PoolStats, RiskScoreParams, ScoreWeights, SubScores};

/// Variant-specific scoring parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringProfile {
    pub weights: ScoreWeights,
    /// APY (percent) that earns a yield sub-score of 100.
    pub full_score_apy: f64,
    /// Upper bound on the yield sub-score.
    pub yield_cap: f64,
    /// TVL that earns a liquidity sub-score of 100.
    pub full_score_tvl: Usd,
}

impl ScoringProfile {
    /// Conservative scoring: 30% APY is a full score, capped at 100; $50M TVL
    /// is fully liquid.
    #[must_use]
    pub fn balanced() -> Self {
        Self {
            weights: ScoreWeights::new(0.30, 0.25, 0.25, 0.20),
            full_score_apy: 30.0,
            yield_cap: 100.0,
            full_score_tvl: Decimal::from(50_000_000),
        }
    }

    /// Yield-chasing scoring: 50% APY is a full score and outliers earn up to
    /// 120; $10M TVL is fully liquid.
    #[must_use]
    pub fn high_yield() -> Self {
        Self {
            weights: ScoreWeights::new(0.60, 0.15, 0.15, 0.10),
            full_score_apy: 50.0,
            yield_cap: 120.0,
            full_score_tvl: Decimal::from(10_000_000),
        }
    }

    /// Score one pool.
    #[must_use]
    pub fn score(&self, market: &Market, stats: &PoolStats, risk: &RiskScoreParams) -> PoolScore {
        let sub_scores = SubScores::new(
            self.yield_score(stats.apy()),
            risk_score(market, stats, risk),
            self.liquidity_score(market.pool_tvl()),
            balance_score(market),
        );
        PoolScore::new(market.clone(), stats.clone(), sub_scores, &self.weights)
    }

    fn yield_score(&self, apy: f64) -> f64 {
        if self.full_score_apy <= 0.0 || !apy.is_finite() {
            return 0.0;
        }
        (apy / self.full_score_apy * 100.0).clamp(0.0, self.yield_cap)
    }

    fn liquidity_score(&self, tvl: Usd) -> f64 {
        if tvl <= Decimal::ZERO {
            return 0.0;
        }
        if self.full_score_tvl <= Decimal::ZERO || tvl >= self.full_score_tvl {
            return 100.0;
        }
        money::percent(tvl, self.full_score_tvl).clamp(0.0, 100.0)
    }
}

/// Inverted raw risk: a raw score of 0 maps to 100, 10 maps to 0.
fn risk_score(market: &Market, stats: &PoolStats, params: &RiskScoreParams) -> f64 {
    (10.0 - stats.risk_score(market, params)) * 10.0
}

fn balance_score(market: &Market) -> f64 {
    (1.0 - market.oi_imbalance()) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn deep_balanced_pool() -> Market {
        Market::new("0x1", "ETH-USDC")
            .with_tvl(dec!(50000000))
            .with_open_interest(dec!(1000000), dec!(1000000))
    }

    #[test]
    fn test_balanced_profile_scores() {
        let profile = ScoringProfile::balanced();
        let stats = PoolStats::new("0x1", 15.0, 0.5);

        let score = profile.score(&deep_balanced_pool(), &stats, &RiskScoreParams::default());
        let sub = score.sub_scores();

        assert!((sub.yield_score - 50.0).abs() < 1e-9);
        assert!((sub.risk - 50.0).abs() < 1e-9);
        assert!((sub.liquidity - 100.0).abs() < 1e-9);
        assert!((sub.balance - 100.0).abs() < 1e-9);
        assert!((score.total() - 72.5).abs() < 1e-9);
    }

    #[test]
    fn test_yield_score_caps() {
        let stats = PoolStats::new("0x1", 90.0, 0.5);
        let params = RiskScoreParams::default();

        let balanced = ScoringProfile::balanced().score(&deep_balanced_pool(), &stats, &params);
        let aggressive = ScoringProfile::high_yield().score(&deep_balanced_pool(), &stats, &params);

        assert_eq!(balanced.sub_scores().yield_score, 100.0);
        assert_eq!(aggressive.sub_scores().yield_score, 120.0);
    }

    #[test]
    fn test_liquidity_ramp() {
        let profile = ScoringProfile::high_yield();
        let market = Market::new("0x1", "ETH-USDC").with_tvl(dec!(2500000));
        let stats = PoolStats::new("0x1", 10.0, 0.1);

        let score = profile.score(&market, &stats, &RiskScoreParams::default());
        assert!((score.sub_scores().liquidity - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_inputs_degrade_to_zero() {
        let profile = ScoringProfile::balanced();
        let market = Market::new("0x1", "ETH-USDC");
        let stats = PoolStats::new("0x1", 0.0, 0.0);

        let score = profile.score(&market, &stats, &RiskScoreParams::default());
        assert_eq!(score.sub_scores().yield_score, 0.0);
        assert_eq!(score.sub_scores().liquidity, 0.0);
        assert_eq!(score.sub_scores().balance, 100.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let profile = ScoringProfile::balanced();
        let market = deep_balanced_pool().with_open_interest(dec!(700000), dec!(300000));
        let stats = PoolStats::new("0x1", 22.0, 0.85);
        let params = RiskScoreParams::default();

        let first = profile.score(&market, &stats, &params);
        let second = profile.score(&market, &stats, &params);
        assert_eq!(first.sub_scores(), second.sub_scores());
        assert_eq!(first.total(), second.total());
    }
}
