//! Risk management configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::DEFAULT_HISTORY_CAPACITY;

/// Risk management configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Total portfolio cap in dollars.
    #[serde(default = "default_max_position_usd")]
    pub max_position_usd: Decimal,
    /// Smallest deposit worth submitting.
    #[serde(default = "default_min_position_usd")]
    pub min_position_usd: Decimal,
    /// Loss (percent of cost basis) that raises a drawdown warning.
    #[serde(default = "default_max_drawdown_pct")]
    pub max_drawdown_pct: f64,
    /// Loss (percent of cost basis) that triggers an emergency exit.
    #[serde(default = "default_stop_loss_pct")]
    pub stop_loss_pct: f64,
    /// Open-interest imbalance ratio (0-1) that raises a warning.
    #[serde(default = "default_max_oi_imbalance")]
    pub max_oi_imbalance: f64,
    /// Multiplier on the single-pool cap before concentration is flagged.
    #[serde(default = "default_concentration_tolerance")]
    pub concentration_tolerance: f64,
    /// Value samples kept per market.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_max_position_usd() -> Decimal {
    Decimal::from(10_000)
}

fn default_min_position_usd() -> Decimal {
    Decimal::from(100)
}

const fn default_max_drawdown_pct() -> f64 {
    10.0
}

const fn default_stop_loss_pct() -> f64 {
    15.0
}

const fn default_max_oi_imbalance() -> f64 {
    0.3
}

const fn default_concentration_tolerance() -> f64 {
    1.2
}

const fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_position_usd: default_max_position_usd(),
            min_position_usd: default_min_position_usd(),
            max_drawdown_pct: default_max_drawdown_pct(),
            stop_loss_pct: default_stop_loss_pct(),
            max_oi_imbalance: default_max_oi_imbalance(),
            concentration_tolerance: default_concentration_tolerance(),
            history_capacity: default_history_capacity(),
        }
    }
}
