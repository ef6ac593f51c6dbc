//! High-yield strategy: chase the best APY.
//!
//! Pools are ranked by raw APY. New capital goes to the single top pool, and
//! a held pool is switched out when the top APY beats it by the configured
//! multiplier.

use rust_decimal::Decimal;

use super::passes::{
    exit_pass, find_score, sort_by_priority, withdrawn_keys, PRIORITY_DEPOSIT,
};
use super::{ScoringProfile, StatsByKey, Strategy, StrategySettings};
use crate::domain::money::Usd;
use crate::domain::position::held_in;
use crate::domain::{Market, PoolScore, Position, Signal};

const PRIORITY_SWITCH_EXIT: u8 = 1;
const PRIORITY_SWITCH_ENTRY: u8 = 2;
const SWITCH_CONFIDENCE: f64 = 0.8;

pub struct HighYieldStrategy {
    settings: StrategySettings,
    profile: ScoringProfile,
}

impl HighYieldStrategy {
    pub const NAME: &'static str = "high_yield";

    #[must_use]
    pub fn new(settings: StrategySettings) -> Self {
        Self {
            settings,
            profile: ScoringProfile::high_yield(),
        }
    }

    /// Move held pools into the best pool when its APY is sufficiently higher.
    ///
    /// A position already withdrawn by the exit pass keeps that single
    /// withdrawal but still gets its matching deposit into the best pool.
    fn switch_pass(
        &self,
        best: &PoolScore,
        scores: &[PoolScore],
        positions: &[Position],
        skip: &[Signal],
    ) -> Vec<Signal> {
        let exited = withdrawn_keys(skip);
        let mut signals = Vec::new();

        for position in positions {
            let key = position.market_key();
            if key == best.market_key() {
                continue;
            }
            let Some(current) = find_score(scores, key) else {
                continue;
            };

            if best.apy() <= current.apy() * self.settings.switch_apy_multiplier {
                continue;
            }

            if !exited.contains(key) {
                signals.push(
                    Signal::withdraw(
                        key.clone(),
                        position.name(),
                        position.value_usd(),
                        format!(
                            "switch to higher yield ({:.1}% -> {:.1}%)",
                            current.apy(),
                            best.apy()
                        ),
                    )
                    .with_priority(PRIORITY_SWITCH_EXIT)
                    .with_confidence(SWITCH_CONFIDENCE),
                );
            }
            signals.push(
                Signal::deposit(
                    best.market_key().clone(),
                    best.name(),
                    position.value_usd(),
                    format!("top APY {:.1}%", best.apy()),
                )
                .with_priority(PRIORITY_SWITCH_ENTRY)
                .with_confidence(SWITCH_CONFIDENCE),
            );
        }

        signals
    }

    /// Put new capital into the top pool, up to its single-pool headroom.
    fn allocation_pass(&self, best: &PoolScore, positions: &[Position], capital: Usd) -> Option<Signal> {
        let limits = &self.settings.limits;
        if capital <= Decimal::ZERO || best.apy() < self.settings.min_apy {
            return None;
        }

        let headroom = limits.pool_headroom(held_in(positions, best.market_key()));
        let amount = capital.min(headroom);
        if amount < limits.min_position_usd {
            return None;
        }

        Some(
            Signal::deposit(
                best.market_key().clone(),
                best.name(),
                amount,
                format!("top APY {:.1}%", best.apy()),
            )
            .with_priority(PRIORITY_DEPOSIT)
            .with_confidence(best.confidence()),
        )
    }
}

impl Strategy for HighYieldStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Chases the highest APY and accepts more risk and concentration"
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
        ranked.sort_by(|a, b| b.apy().total_cmp(&a.apy()));

        let mut signals = exit_pass(&ranked, positions, self.settings.min_apy);

        if let Some(best) = ranked.first() {
            let switches = self.switch_pass(best, &ranked, positions, &signals);
            signals.extend(switches);
            signals.extend(self.allocation_pass(best, positions, available_capital));
        }

        sort_by_priority(&mut signals);
        signals
    }
}
