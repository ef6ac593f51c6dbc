//! Canonical test settings.
//!
//! Single source of truth for settings used across tests.

use crate::application::risk::RiskSettings;
use crate::application::strategy::StrategySettings;

/// Default strategy settings: 10% minimum APY, $10k cap, 30% single-pool cap.
pub fn strategy_settings() -> StrategySettings {
    StrategySettings::default()
}

/// Risk settings with a 10% drawdown warning and 15% stop-loss.
pub fn risk_settings() -> RiskSettings {
    RiskSettings {
        max_drawdown_pct: 10.0,
        stop_loss_pct: 15.0,
        ..RiskSettings::default()
    }
}

/// Minimal TOML configuration selecting `strategy`.
pub fn config_toml(strategy: &str) -> String {
    format!("dry_run = true\n\n[strategy]\ntype = \"{strategy}\"\n")
}
