use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::money::{self, Usd};
use crate::domain::position::portfolio_value;
use crate::domain::{Position, RiskLevel};

/// Portfolio-level risk snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSummary {
    pub total_value_usd: Usd,
    pub total_pnl_usd: Usd,
    /// Unrealized PnL relative to the summed positive cost basis, in percent.
    pub overall_pnl_pct: f64,
    /// Largest single position's share of portfolio value, in percent.
    pub max_concentration_pct: f64,
    pub active_alerts: usize,
    pub risk_level: RiskLevel,
}

impl RiskSummary {
    pub(crate) fn compute(positions: &[Position], active_alerts: usize, risk_level: RiskLevel) -> Self {
        let total_value = portfolio_value(positions);
        let total_pnl: Usd = positions.iter().map(Position::unrealized_pnl).sum();

        let mut overall_pnl_pct = 0.0;
        let mut max_concentration_pct = 0.0;

        if total_value > Decimal::ZERO {
            let total_cost: Usd = positions
                .iter()
                .map(Position::cost_basis)
                .filter(|cost| *cost > Decimal::ZERO)
                .sum();
            overall_pnl_pct = money::percent(total_pnl, total_cost);

            max_concentration_pct = positions
                .iter()
                .map(|p| money::percent(p.value_usd(), total_value))
                .fold(0.0, f64::max);
        }

        Self {
            total_value_usd: total_value,
            total_pnl_usd: total_pnl,
            overall_pnl_pct,
            max_concentration_pct,
            active_alerts,
            risk_level,
        }
    }
}
