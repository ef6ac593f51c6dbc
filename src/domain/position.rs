//! Holder stakes in GM pools.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::MarketKey;
use super::money::{self, Usd};

/// A holder's stake in one market.
///
/// The market is referenced by key only; the matching [`Market`](super::Market)
/// is looked up at use time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    market_key: MarketKey,
    #[serde(default)]
    name: String,
    /// GM tokens held.
    #[serde(default)]
    gm_balance: Decimal,
    #[serde(default)]
    value_usd: Usd,
    #[serde(default)]
    cost_basis: Usd,
    #[serde(default)]
    unrealized_pnl: Usd,
    #[serde(default)]
    realized_pnl: Usd,
    #[serde(default)]
    fees_earned: Usd,
}

impl Position {
    /// Create an empty position in a market.
    pub fn new(market_key: impl Into<MarketKey>, name: impl Into<String>) -> Self {
        Self {
            market_key: market_key.into(),
            name: name.into(),
            gm_balance: Decimal::ZERO,
            value_usd: Decimal::ZERO,
            cost_basis: Decimal::ZERO,
            unrealized_pnl: Decimal::ZERO,
            realized_pnl: Decimal::ZERO,
            fees_earned: Decimal::ZERO,
        }
    }

    /// Set the GM balance and its current USD value.
    #[must_use]
    pub fn with_holding(mut self, gm_balance: Decimal, value_usd: Usd) -> Self {
        self.gm_balance = gm_balance;
        self.value_usd = value_usd;
        self
    }

    /// Set the current USD value.
    #[must_use]
    pub fn with_value(mut self, value_usd: Usd) -> Self {
        self.value_usd = value_usd;
        self
    }

    /// Set cost basis and unrealized PnL.
    #[must_use]
    pub fn with_cost(mut self, cost_basis: Usd, unrealized_pnl: Usd) -> Self {
        self.cost_basis = cost_basis;
        self.unrealized_pnl = unrealized_pnl;
        self
    }

    /// Set realized PnL and accrued fees.
    #[must_use]
    pub fn with_realized(mut self, realized_pnl: Usd, fees_earned: Usd) -> Self {
        self.realized_pnl = realized_pnl;
        self.fees_earned = fees_earned;
        self
    }

    #[must_use]
    pub const fn market_key(&self) -> &MarketKey {
        &self.market_key
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn gm_balance(&self) -> Decimal {
        self.gm_balance
    }

    #[must_use]
    pub const fn value_usd(&self) -> Usd {
        self.value_usd
    }

    #[must_use]
    pub const fn cost_basis(&self) -> Usd {
        self.cost_basis
    }

    #[must_use]
    pub const fn unrealized_pnl(&self) -> Usd {
        self.unrealized_pnl
    }

    #[must_use]
    pub const fn realized_pnl(&self) -> Usd {
        self.realized_pnl
    }

    #[must_use]
    pub const fn fees_earned(&self) -> Usd {
        self.fees_earned
    }

    /// Unrealized PnL as a percentage of cost basis; zero without a cost basis.
    #[must_use]
    pub fn pnl_pct(&self) -> f64 {
        money::percent(self.unrealized_pnl, self.cost_basis)
    }

    /// Unrealized + realized PnL + fees earned.
    #[must_use]
    pub fn total_pnl(&self) -> Usd {
        self.unrealized_pnl + self.realized_pnl + self.fees_earned
    }
}

/// Sum of USD value across positions.
#[must_use]
pub fn portfolio_value(positions: &[Position]) -> Usd {
    positions.iter().map(Position::value_usd).sum()
}

/// USD value currently held in one market.
#[must_use]
pub fn held_in(positions: &[Position], market_key: &MarketKey) -> Usd {
    positions
        .iter()
        .filter(|p| p.market_key() == market_key)
        .map(Position::value_usd)
        .sum()
}
