//! Risk manager.
//!
//! Runs a fixed four-check pipeline over current holdings each evaluation
//! cycle: drawdown/stop-loss, OI imbalance, low APY, concentration. Every
//! check runs every cycle. Alerts are appended to a log that is never
//! truncated; acknowledgment only flips a flag.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use super::summary::RiskSummary;
use crate::application::strategy::StatsByKey;
use crate::domain::money;
use crate::domain::position::portfolio_value;
use crate::domain::{
    AlertCategory, AlertSeverity, Market, MarketKey, Position, RiskAlert, RiskLevel, ValueHistory,
    DEFAULT_HISTORY_CAPACITY,
};

/// Markets keyed by market key.
pub type MarketsByKey = HashMap<MarketKey, Market>;

/// Thresholds used by the risk checks. Percentages are in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSettings {
    /// Loss (as a positive percent of cost) that raises a drawdown warning.
    pub max_drawdown_pct: f64,
    /// Loss (as a positive percent of cost) that demands an exit.
    pub stop_loss_pct: f64,
    /// OI imbalance ratio above which a held pool is flagged.
    pub max_oi_imbalance: f64,
    pub min_apy: f64,
    pub max_single_pool_pct: f64,
    /// Multiplier on `max_single_pool_pct` before concentration is flagged.
    pub concentration_tolerance: f64,
    /// Samples kept per pool in the value history.
    pub history_capacity: usize,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            max_drawdown_pct: 10.0,
            stop_loss_pct: 15.0,
            max_oi_imbalance: 0.3,
            min_apy: 10.0,
            max_single_pool_pct: 30.0,
            concentration_tolerance: 1.2,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl RiskSettings {
    /// Share of portfolio value above which a position is flagged.
    #[must_use]
    pub fn concentration_limit_pct(&self) -> f64 {
        self.max_single_pool_pct * self.concentration_tolerance
    }
}

/// Watches holdings for drawdown, concentration and imbalance.
///
/// Single caller: checks take `&mut self` and never overlap.
pub struct RiskManager {
    settings: RiskSettings,
    alerts: Vec<RiskAlert>,
    history: HashMap<MarketKey, ValueHistory>,
    last_check: Option<DateTime<Utc>>,
}

impl RiskManager {
    #[must_use]
    pub fn new(settings: RiskSettings) -> Self {
        Self {
            settings,
            alerts: Vec::new(),
            history: HashMap::new(),
            last_check: None,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &RiskSettings {
        &self.settings
    }

    /// Run all checks and return the alerts raised this cycle.
    ///
    /// New alerts are appended to the log, and each position's value is
    /// recorded in its history after the checks complete.
    pub fn check_all(
        &mut self,
        positions: &[Position],
        markets: &MarketsByKey,
        stats: &StatsByKey,
    ) -> Vec<RiskAlert> {
        let mut new_alerts = self.check_drawdown(positions);
        new_alerts.extend(self.check_oi_imbalance(positions, markets));
        new_alerts.extend(self.check_apy(positions, stats));
        new_alerts.extend(self.check_concentration(positions));

        for alert in &new_alerts {
            log_alert(alert);
        }

        self.last_check = Some(Utc::now());
        self.alerts.extend(new_alerts.iter().cloned());

        let capacity = self.settings.history_capacity;
        for position in positions {
            self.history
                .entry(position.market_key().clone())
                .or_insert_with(|| ValueHistory::with_capacity(capacity))
                .push(position.value_usd());
        }

        info!(
            positions = positions.len(),
            new_alerts = new_alerts.len(),
            level = %self.risk_level(),
            "Risk check complete"
        );

        new_alerts
    }

    /// True if any position has hit the stop-loss threshold.
    #[must_use]
    pub fn should_emergency_exit(&self, positions: &[Position]) -> bool {
        let trigger = positions.iter().find(|p| self.hits_stop_loss(p));
        if let Some(position) = trigger {
            warn!(
                market = %position.name(),
                pnl_pct = position.pnl_pct(),
                stop_loss_pct = self.settings.stop_loss_pct,
                "Emergency exit triggered"
            );
        }
        trigger.is_some()
    }

    /// Unacknowledged alerts, oldest first.
    #[must_use]
    pub fn get_active_alerts(&self) -> Vec<&RiskAlert> {
        self.alerts.iter().filter(|a| !a.is_acknowledged()).collect()
    }

    /// Acknowledge the alert at `index` in the full log.
    ///
    /// Returns false if the index is out of range.
    pub fn acknowledge_alert(&mut self, index: usize) -> bool {
        match self.alerts.get_mut(index) {
            Some(alert) => {
                alert.acknowledge();
                true
            }
            None => false,
        }
    }

    /// Full alert log, including acknowledged alerts.
    #[must_use]
    pub fn alerts(&self) -> &[RiskAlert] {
        &self.alerts
    }

    /// Risk level derived from the active alerts.
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::classify(self.alerts.iter().filter(|a| !a.is_acknowledged()))
    }

    #[must_use]
    pub fn get_risk_summary(&self, positions: &[Position]) -> RiskSummary {
        let active = self.alerts.iter().filter(|a| !a.is_acknowledged()).count();
        RiskSummary::compute(positions, active, self.risk_level())
    }

    /// Recorded values for one pool, if it has ever been held.
    #[must_use]
    pub fn value_history(&self, market_key: &MarketKey) -> Option<&ValueHistory> {
        self.history.get(market_key)
    }

    #[must_use]
    pub const fn last_check(&self) -> Option<DateTime<Utc>> {
        self.last_check
    }

    fn hits_stop_loss(&self, position: &Position) -> bool {
        position.cost_basis() > Decimal::ZERO && position.pnl_pct() <= -self.settings.stop_loss_pct
    }

    fn check_drawdown(&self, positions: &[Position]) -> Vec<RiskAlert> {
        let stop_loss = self.settings.stop_loss_pct;
        let max_drawdown = self.settings.max_drawdown_pct;

        positions
            .iter()
            .filter(|p| p.cost_basis() > Decimal::ZERO)
            .filter_map(|p| {
                let pnl_pct = p.pnl_pct();
                let alert = if pnl_pct <= -stop_loss {
                    RiskAlert::new(
                        AlertSeverity::Critical,
                        AlertCategory::StopLoss,
                        format!("stop loss hit: down {:.1}%", pnl_pct.abs()),
                        pnl_pct,
                        -stop_loss,
                    )
                } else if pnl_pct <= -max_drawdown {
                    RiskAlert::new(
                        AlertSeverity::Warning,
                        AlertCategory::Drawdown,
                        format!("drawdown warning: down {:.1}%", pnl_pct.abs()),
                        pnl_pct,
                        -max_drawdown,
                    )
                } else {
                    return None;
                };
                Some(alert.for_market(p.market_key().clone(), p.name()))
            })
            .collect()
    }

    fn check_oi_imbalance(&self, positions: &[Position], markets: &MarketsByKey) -> Vec<RiskAlert> {
        let max_imbalance = self.settings.max_oi_imbalance;

        positions
            .iter()
            .filter_map(|p| {
                let market = markets.get(p.market_key())?;
                let imbalance = market.oi_imbalance();
                if imbalance <= max_imbalance {
                    return None;
                }
                let side = if market.is_long_heavy() { "long" } else { "short" };
                Some(
                    RiskAlert::new(
                        AlertSeverity::Warning,
                        AlertCategory::Imbalance,
                        format!("{side}-heavy open interest: imbalance {imbalance:.2}"),
                        imbalance,
                        max_imbalance,
                    )
                    .for_market(p.market_key().clone(), p.name()),
                )
            })
            .collect()
    }

    fn check_apy(&self, positions: &[Position], stats: &StatsByKey) -> Vec<RiskAlert> {
        let min_apy = self.settings.min_apy;

        positions
            .iter()
            .filter_map(|p| {
                let apy = stats.get(p.market_key())?.apy();
                if apy >= min_apy {
                    return None;
                }
                Some(
                    RiskAlert::new(
                        AlertSeverity::Info,
                        AlertCategory::ApyLow,
                        format!("APY below minimum: {apy:.1}% < {min_apy}%"),
                        apy,
                        min_apy,
                    )
                    .for_market(p.market_key().clone(), p.name()),
                )
            })
            .collect()
    }

    fn check_concentration(&self, positions: &[Position]) -> Vec<RiskAlert> {
        let total = portfolio_value(positions);
        if total <= Decimal::ZERO {
            return Vec::new();
        }

        let limit = self.settings.concentration_limit_pct();
        let cap = self.settings.max_single_pool_pct;

        positions
            .iter()
            .filter_map(|p| {
                let share = money::percent(p.value_usd(), total);
                if share <= limit {
                    return None;
                }
                Some(
                    RiskAlert::new(
                        AlertSeverity::Warning,
                        AlertCategory::Concentration,
                        format!("position too concentrated: {share:.1}% > {cap}%"),
                        share,
                        cap,
                    )
                    .for_market(p.market_key().clone(), p.name()),
                )
            })
            .collect()
    }
}

impl Default for RiskManager {
    fn default() -> Self {
        Self::new(RiskSettings::default())
    }
}

fn log_alert(alert: &RiskAlert) {
    let market = alert.market_name().unwrap_or("-");
    match alert.severity() {
        AlertSeverity::Info => info!(
            category = %alert.category(),
            market,
            value = alert.value(),
            threshold = alert.threshold(),
            "{}",
            alert.message()
        ),
        AlertSeverity::Warning => warn!(
            category = %alert.category(),
            market,
            value = alert.value(),
            threshold = alert.threshold(),
            "{}",
            alert.message()
        ),
        AlertSeverity::Critical => error!(
            category = %alert.category(),
            market,
            value = alert.value(),
            threshold = alert.threshold(),
            "{}",
            alert.message()
        ),
    }
}
