//! Signal passes shared by the strategy variants.

use std::collections::HashSet;

use crate::domain::{MarketKey, PoolScore, Position, Signal};

pub(crate) const PRIORITY_FILTERED_EXIT: u8 = 1;
pub(crate) const PRIORITY_LOW_APY_EXIT: u8 = 2;
pub(crate) const PRIORITY_DEPOSIT: u8 = 3;
pub(crate) const PRIORITY_REBALANCE: u8 = 4;

pub(crate) fn find_score<'a>(scores: &'a [PoolScore], key: &MarketKey) -> Option<&'a PoolScore> {
    scores.iter().find(|s| s.market_key() == key)
}

/// Withdraw the full value of positions in pools that were filtered out or
/// yield below `min_apy`.
pub(crate) fn exit_pass(scores: &[PoolScore], positions: &[Position], min_apy: f64) -> Vec<Signal> {
    let mut signals = Vec::new();

    for position in positions {
        match find_score(scores, position.market_key()) {
            None => signals.push(
                Signal::withdraw(
                    position.market_key().clone(),
                    position.name(),
                    position.value_usd(),
                    "pool filtered out",
                )
                .with_priority(PRIORITY_FILTERED_EXIT),
            ),
            Some(score) if score.apy() < min_apy => signals.push(
                Signal::withdraw(
                    position.market_key().clone(),
                    position.name(),
                    position.value_usd(),
                    format!("APY {:.1}% < {min_apy}%", score.apy()),
                )
                .with_priority(PRIORITY_LOW_APY_EXIT),
            ),
            Some(_) => {}
        }
    }

    signals
}

/// Markets already being exited by a set of signals.
pub(crate) fn withdrawn_keys(signals: &[Signal]) -> HashSet<MarketKey> {
    signals
        .iter()
        .filter(|s| s.is_withdraw())
        .map(|s| s.market_key().clone())
        .collect()
}

/// Stable sort by ascending priority.
pub(crate) fn sort_by_priority(signals: &mut [Signal]) {
    signals.sort_by_key(Signal::priority);
}
