//! Risk-limit filter applied to generated signals.

use rust_decimal::Decimal;

use crate::domain::money::{self, Usd};
use crate::domain::position::{held_in, portfolio_value};
use crate::domain::{Position, Signal};
use crate::error::RiskRejection;

/// Result of a risk check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskCheckResult {
    /// Signal may proceed.
    Approved,
    /// Signal is rejected with reason.
    Rejected(RiskRejection),
}

impl RiskCheckResult {
    /// Check if approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Get rejection reason if rejected.
    #[must_use]
    pub const fn rejection(&self) -> Option<&RiskRejection> {
        match self {
            Self::Rejected(r) => Some(r),
            Self::Approved => None,
        }
    }
}

/// Portfolio and position size limits.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskLimits {
    /// Cap on total portfolio value.
    pub max_position_usd: Usd,
    /// Smallest deposit worth making.
    pub min_position_usd: Usd,
    /// Per-pool cap as a percentage of `max_position_usd`.
    pub max_single_pool_pct: f64,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_position_usd: Decimal::from(10_000),
            min_position_usd: Decimal::from(100),
            max_single_pool_pct: 30.0,
        }
    }
}

impl RiskLimits {
    /// Cap on the value held in any single pool.
    #[must_use]
    pub fn max_single_pool_usd(&self) -> Usd {
        money::percent_of(self.max_position_usd, self.max_single_pool_pct)
    }

    /// Room left under the single-pool cap for a pool already holding `held`.
    /// Negative when the pool is already over the cap.
    #[must_use]
    pub fn pool_headroom(&self, held: Usd) -> Usd {
        self.max_single_pool_usd() - held
    }

    /// Check a signal against the limits.
    ///
    /// Deposits are checked in order: portfolio cap, single-pool cap, minimum
    /// size. Withdrawals are always approved.
    #[must_use]
    pub fn check(&self, signal: &Signal, positions: &[Position]) -> RiskCheckResult {
        if signal.is_withdraw() {
            return RiskCheckResult::Approved;
        }

        let amount = signal.amount_usd();

        let total = portfolio_value(positions);
        if total + amount > self.max_position_usd {
            return RiskCheckResult::Rejected(RiskRejection::PortfolioCapExceeded {
                current: total,
                amount,
                limit: self.max_position_usd,
            });
        }

        let in_pool = held_in(positions, signal.market_key());
        let pool_cap = self.max_single_pool_usd();
        if in_pool + amount > pool_cap {
            return RiskCheckResult::Rejected(RiskRejection::PoolCapExceeded {
                market: signal.market_name().to_string(),
                current: in_pool,
                amount,
                limit: pool_cap,
            });
        }

        if amount < self.min_position_usd {
            return RiskCheckResult::Rejected(RiskRejection::BelowMinimumPosition {
                amount,
                minimum: self.min_position_usd,
            });
        }

        RiskCheckResult::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarketKey;
    use rust_decimal_macros::dec;

    fn deposit(key: &str, amount: Decimal) -> Signal {
        Signal::deposit(MarketKey::from(key), "ETH-USDC", amount, "test")
    }

    #[test]
    fn test_single_pool_cap() {
        assert_eq!(RiskLimits::default().max_single_pool_usd(), dec!(3000));
    }

    #[test]
    fn test_deposit_within_limits_is_approved() {
        let result = RiskLimits::default().check(&deposit("0x1", dec!(1000)), &[]);
        assert!(result.is_approved());
    }

    #[test]
    fn test_portfolio_cap_rejects() {
        let positions = vec![Position::new("0x2", "BTC-USDC").with_value(dec!(9500))];
        let result = RiskLimits::default().check(&deposit("0x1", dec!(1000)), &positions);
        assert!(matches!(
            result.rejection(),
            Some(RiskRejection::PortfolioCapExceeded { .. })
        ));
    }

    #[test]
    fn test_pool_cap_rejects() {
        let positions = vec![Position::new("0x1", "ETH-USDC").with_value(dec!(2500))];
        let result = RiskLimits::default().check(&deposit("0x1", dec!(1000)), &positions);
        assert_eq!(
            result.rejection(),
            Some(&RiskRejection::PoolCapExceeded {
                market: "ETH-USDC".to_string(),
                current: dec!(2500),
                amount: dec!(1000),
                limit: dec!(3000),
            })
        );
    }

    #[test]
    fn test_minimum_position_rejects() {
        let result = RiskLimits::default().check(&deposit("0x1", dec!(50)), &[]);
        assert!(matches!(
            result.rejection(),
            Some(RiskRejection::BelowMinimumPosition { .. })
        ));
    }

    #[test]
    fn test_withdraw_always_approved() {
        let positions = vec![Position::new("0x1", "ETH-USDC").with_value(dec!(50000))];
        let signal = Signal::withdraw(MarketKey::from("0x1"), "ETH-USDC", dec!(5), "exit");
        assert!(RiskLimits::default().check(&signal, &positions).is_approved());
    }
}
