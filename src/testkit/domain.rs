//! Builders for domain primitives used across tests.
//!
//! Money arguments are whole dollars so fixtures stay short; use the domain
//! builders directly when cents matter.

use rust_decimal::Decimal;

use crate::domain::{Market, PoolStats, Position};

/// A market with balanced open interest and the given TVL.
pub fn market(key: &str, name: &str, tvl: i64) -> Market {
    let oi = Decimal::from(tvl) / Decimal::from(40);
    Market::new(key, name)
        .with_tvl(Decimal::from(tvl))
        .with_open_interest(oi, oi)
}

/// A market with explicit long and short open interest.
pub fn skewed_market(key: &str, name: &str, tvl: i64, long_oi: i64, short_oi: i64) -> Market {
    Market::new(key, name)
        .with_tvl(Decimal::from(tvl))
        .with_open_interest(Decimal::from(long_oi), Decimal::from(short_oi))
}

/// Pool stats at 50% utilization.
pub fn stats(key: &str, apy: f64) -> PoolStats {
    PoolStats::new(key, apy, 0.5)
}

/// A position worth `value` with no cost basis.
pub fn position(key: &str, name: &str, value: i64) -> Position {
    Position::new(key, name).with_value(Decimal::from(value))
}

/// A position with cost basis and unrealized PnL; value is cost plus PnL.
pub fn position_with_pnl(key: &str, name: &str, cost: i64, unrealized: i64) -> Position {
    Position::new(key, name)
        .with_value(Decimal::from(cost + unrealized))
        .with_cost(Decimal::from(cost), Decimal::from(unrealized))
}
