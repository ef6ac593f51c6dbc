//! Balanced strategy: spread capital across several well-scored pools.
//!
//! Pools are ranked by composite score. New capital is split across the top
//! pools in proportion to their scores, each allocation capped by the
//! single-pool limit. When there is nothing else to do, overweight holdings
//! are trimmed back towards their score-weighted target share. Underweight
//! holdings are never topped up without new capital.

use rust_decimal::Decimal;

use super::passes::{
    exit_pass, find_score, sort_by_priority, PRIORITY_DEPOSIT, PRIORITY_REBALANCE,
};
use super::{ScoringProfile, StatsByKey, Strategy, StrategySettings};
use crate::domain::money::{self, Usd};
use crate::domain::position::held_in;
use crate::domain::{Market, PoolScore, Position, Signal};

pub struct BalancedStrategy {
    settings: StrategySettings,
    profile: ScoringProfile,
}

impl BalancedStrategy {
    pub const NAME: &'static str = "balanced";

    #[must_use]
    pub fn new(settings: StrategySettings) -> Self {
        Self {
            settings,
            profile: ScoringProfile::balanced(),
        }
    }

    /// Split `capital` across the top-scoring pools that clear the APY gate.
    fn allocation_pass(
        &self,
        ranked: &[PoolScore],
        positions: &[Position],
        capital: Usd,
    ) -> Vec<Signal> {
        if capital <= Decimal::ZERO {
            return Vec::new();
        }

        let selected: Vec<&PoolScore> = ranked
            .iter()
            .filter(|s| s.apy() >= self.settings.min_apy)
            .take(self.settings.max_pools)
            .collect();

        let total_score: f64 = selected.iter().map(|s| s.total()).sum();
        if total_score <= 0.0 {
            return Vec::new();
        }

        let limits = &self.settings.limits;
        let mut signals = Vec::new();

        for score in selected {
            let weight = score.total() / total_score;
            let target = money::floor_cents(capital * money::from_f64(weight));
            let headroom = limits.pool_headroom(held_in(positions, score.market_key()));
            let amount = target.min(headroom);

            if amount < limits.min_position_usd {
                continue;
            }

            signals.push(
                Signal::deposit(
                    score.market_key().clone(),
                    score.name(),
                    amount,
                    format!("score {:.1}, APY {:.1}%", score.total(), score.apy()),
                )
                .with_priority(PRIORITY_DEPOSIT)
                .with_confidence(score.confidence()),
            );
        }

        signals
    }

    /// Trim positions whose share of the portfolio exceeds their
    /// score-weighted target by more than the rebalance threshold.
    fn rebalance_pass(&self, scores: &[PoolScore], positions: &[Position]) -> Vec<Signal> {
        let held: Vec<(&Position, &PoolScore)> = positions
            .iter()
            .filter_map(|p| find_score(scores, p.market_key()).map(|s| (p, s)))
            .collect();

        let total_value: Usd = held.iter().map(|(p, _)| p.value_usd()).sum();
        let total_score: f64 = held.iter().map(|(_, s)| s.total()).sum();
        if total_value <= Decimal::ZERO || total_score <= 0.0 {
            return Vec::new();
        }

        let mut signals = Vec::new();

        for (position, score) in held {
            let target_share = score.total() / total_score;
            let current_share = money::to_f64(position.value_usd() / total_value);
            let deviation = (current_share - target_share).abs() * 100.0;

            if deviation <= self.settings.rebalance_threshold || current_share <= target_share {
                continue;
            }

            let target_value = total_value * money::from_f64(target_share);
            let amount = money::floor_cents(position.value_usd() - target_value);
            if amount <= Decimal::ZERO {
                continue;
            }

            signals.push(
                Signal::withdraw(
                    position.market_key().clone(),
                    position.name(),
                    amount,
                    format!("rebalance: deviation {deviation:.1}%"),
                )
                .with_priority(PRIORITY_REBALANCE),
            );
        }

        signals
    }
}

impl Strategy for BalancedStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Balances yield against risk and spreads capital across several pools"
    }

    fn settings(&self) -> &StrategySettings {
        &self.settings
    }

    fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    fn generate_signals(
        &self,
        markets: &[Market],
        stats: &StatsByKey,
        positions: &[Position],
        available_capital: Usd,
    ) -> Vec<Signal> {
        let mut ranked = self.score_candidates(markets, stats);
        ranked.sort_by(|a, b| b.total().total_cmp(&a.total()));

        let mut signals = exit_pass(&ranked, positions, self.settings.min_apy);
        signals.extend(self.allocation_pass(&ranked, positions, available_capital));

        if signals.is_empty() && positions.len() >= 2 {
            signals = self.rebalance_pass(&ranked, positions);
        }

        sort_by_priority(&mut signals);
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PoolStats;
    use crate::domain::signal::total_deposits;
    use rust_decimal_macros::dec;

    fn pool(key: &str, name: &str) -> Market {
        Market::new(key, name)
            .with_tvl(dec!(20000000))
            .with_open_interest(dec!(500000), dec!(500000))
    }

    fn setup() -> (Vec<Market>, StatsByKey) {
        let markets = vec![
            pool("0x1", "ETH-USDC"),
            pool("0x2", "BTC-USDC"),
            pool("0x3", "ARB-USDC"),
        ];
        let stats: StatsByKey = [
            PoolStats::new("0x1", 25.0, 0.5),
            PoolStats::new("0x2", 15.0, 0.5),
            PoolStats::new("0x3", 12.0, 0.5),
        ]
        .into_iter()
        .map(|s| (s.market_key().clone(), s))
        .collect();
        (markets, stats)
    }

    #[test]
    fn test_allocation_respects_capital() {
        let (markets, stats) = setup();
        let strategy = BalancedStrategy::new(StrategySettings::default());

        let signals = strategy.generate_signals(&markets, &stats, &[], dec!(1000));

        assert!(signals.iter().all(Signal::is_deposit));
        assert!(signals.len() >= 2);
        assert!(total_deposits(&signals) <= dec!(1000));
    }

    #[test]
    fn test_higher_score_gets_more_capital() {
        let (markets, stats) = setup();
        let strategy = BalancedStrategy::new(StrategySettings::default());

        let signals = strategy.generate_signals(&markets, &stats, &[], dec!(1000));
        let eth = signals.iter().find(|s| s.market_name() == "ETH-USDC").unwrap();
        let arb = signals.iter().find(|s| s.market_name() == "ARB-USDC").unwrap();
        assert!(eth.amount_usd() > arb.amount_usd());
    }

    #[test]
    fn test_allocation_capped_by_pool_headroom() {
        let (markets, stats) = setup();
        let strategy = BalancedStrategy::new(StrategySettings::default());
        let positions = vec![Position::new("0x1", "ETH-USDC").with_value(dec!(2950))];

        let signals = strategy.generate_signals(&markets, &stats, &positions, dec!(1000));

        // 50 of headroom is below the 100 minimum, so ETH-USDC gets nothing.
        assert!(signals.iter().all(|s| s.market_name() != "ETH-USDC"));
    }

    #[test]
    fn test_zero_capital_without_positions_is_quiet() {
        let (markets, stats) = setup();
        let strategy = BalancedStrategy::new(StrategySettings::default());
        assert!(strategy
            .generate_signals(&markets, &stats, &[], Decimal::ZERO)
            .is_empty());
    }

    #[test]
    fn test_rebalance_trims_overweight_only() {
        let (markets, stats) = setup();
        let strategy = BalancedStrategy::new(StrategySettings::default());
        let positions = vec![
            Position::new("0x2", "BTC-USDC").with_value(dec!(900)),
            Position::new("0x1", "ETH-USDC").with_value(dec!(100)),
        ];

        let signals = strategy.generate_signals(&markets, &stats, &positions, Decimal::ZERO);

        assert_eq!(signals.len(), 1);
        let trim = &signals[0];
        assert!(trim.is_withdraw());
        assert_eq!(trim.market_name(), "BTC-USDC");
        assert_eq!(trim.priority(), PRIORITY_REBALANCE);
        assert!(trim.amount_usd() > Decimal::ZERO);
        assert!(trim.amount_usd() < dec!(900));
    }

    #[test]
    fn test_rebalance_skipped_when_other_signals_exist() {
        let (markets, stats) = setup();
        let strategy = BalancedStrategy::new(StrategySettings::default());
        let positions = vec![
            Position::new("0x2", "BTC-USDC").with_value(dec!(900)),
            Position::new("0x1", "ETH-USDC").with_value(dec!(100)),
        ];

        let signals = strategy.generate_signals(&markets, &stats, &positions, dec!(1000));
        assert!(signals.iter().all(|s| s.priority() != PRIORITY_REBALANCE));
    }
}
