//! Orchestration of strategy, risk and report cycles.
//!
//! The [`Allocator`] owns one [`StrategyEngine`] and one [`RiskManager`] and
//! is the only place that talks to the notifier. Cycle failures are reported
//! here and never stop the loop; the next tick retries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::config::Config;
use crate::adapter::outbound::notifier::LogNotifier;
use crate::application::risk::{MarketsByKey, RiskManager};
use crate::application::strategy::StrategyEngine;
use crate::domain::money::Usd;
use crate::domain::signal::total_deposits;
use crate::domain::{AlertCategory, Position, RiskAlert, Signal};
use crate::error::Result;
use crate::port::outbound::data::PoolDataSource;
use crate::port::outbound::executor::SignalExecutor;
use crate::port::outbound::notifier::{Notification, Notifier, NotifierRegistry};

const EMERGENCY_EXIT_PRIORITY: u8 = 1;

/// Outcome of one risk cycle.
#[derive(Debug, Clone)]
pub struct RiskReport {
    pub positions: Vec<Position>,
    /// Alerts raised this cycle.
    pub alerts: Vec<RiskAlert>,
    pub emergency_exit: bool,
}

/// Runs strategy and risk cycles against shared collaborators.
pub struct Allocator {
    engine: StrategyEngine,
    risk: RiskManager,
    executor: Arc<dyn SignalExecutor>,
    notifier: Arc<dyn Notifier>,
    check_interval: Duration,
    risk_interval: Duration,
    report_interval: Duration,
}

impl Allocator {
    pub fn new(
        engine: StrategyEngine,
        risk: RiskManager,
        executor: Arc<dyn SignalExecutor>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            engine,
            risk,
            executor,
            notifier,
            check_interval: StrategyEngine::DEFAULT_CHECK_INTERVAL,
            risk_interval: Duration::from_secs(60),
            report_interval: Duration::from_secs(86_400),
        }
    }

    /// Wire an allocator from configuration.
    ///
    /// Fails with an unknown-strategy error before any cycle runs.
    pub fn from_config(
        config: &Config,
        data: Arc<dyn PoolDataSource>,
        executor: Arc<dyn SignalExecutor>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let engine = StrategyEngine::from_name(
            &config.strategy.strategy_type,
            config.strategy_settings(),
            data,
            Arc::clone(&executor),
        )?
        .with_wallet(config.wallet.address.clone())
        .with_check_interval(config.execution.check_interval());

        let risk = RiskManager::new(config.risk_settings());

        Ok(Self::new(engine, risk, executor, notifier)
            .with_intervals(config.execution.check_interval(), config.execution.risk_interval())
            .with_report_interval(config.execution.report_interval()))
    }

    #[must_use]
    pub fn with_intervals(mut self, check_interval: Duration, risk_interval: Duration) -> Self {
        self.check_interval = check_interval;
        self.risk_interval = risk_interval;
        self
    }

    #[must_use]
    pub fn with_report_interval(mut self, report_interval: Duration) -> Self {
        self.report_interval = report_interval;
        self
    }

    #[must_use]
    pub const fn engine(&self) -> &StrategyEngine {
        &self.engine
    }

    #[must_use]
    pub const fn risk_manager(&self) -> &RiskManager {
        &self.risk
    }

    pub fn risk_manager_mut(&mut self) -> &mut RiskManager {
        &mut self.risk
    }

    /// Run one strategy cycle. Submitted signals are announced when not dry.
    pub async fn strategy_cycle(&mut self, capital: Usd, dry_run: bool) -> Result<Vec<Signal>> {
        let signals = self.engine.run(capital, dry_run).await?;
        if !dry_run && !signals.is_empty() {
            self.notifier.notify(Notification::signals_executed(&signals));
        }
        Ok(signals)
    }

    /// Run one risk cycle against fresh positions and market data.
    ///
    /// Every alert raised is sent to the notifier at its own severity. When
    /// the stop-loss is hit the operator is also told to exit, and unless dry
    /// every held position is handed to the executor for withdrawal.
    pub async fn risk_cycle(&mut self, dry_run: bool) -> Result<RiskReport> {
        let (markets, stats) = self.engine.fetch_market_data().await?;
        let positions = self.engine.fetch_positions().await?;
        let markets: MarketsByKey = markets
            .into_iter()
            .map(|m| (m.key().clone(), m))
            .collect();

        let alerts = self.risk.check_all(&positions, &markets, &stats);
        for alert in &alerts {
            self.notifier.notify(Notification::risk_alert(alert));
        }
        let emergency_exit = self.risk.should_emergency_exit(&positions);

        if emergency_exit {
            let stop_losses: Vec<RiskAlert> = alerts
                .iter()
                .filter(|a| a.category() == AlertCategory::StopLoss)
                .cloned()
                .collect();
            self.notifier.notify(Notification::emergency_exit(&stop_losses));

            let exits = exit_signals(&positions);
            if !dry_run && !exits.is_empty() {
                warn!(count = exits.len(), "Submitting emergency exit withdrawals");
                self.executor.submit(exits);
            }
        }

        Ok(RiskReport {
            positions,
            alerts,
            emergency_exit,
        })
    }

    /// Send the portfolio report for the current positions.
    pub async fn report(&self) -> Result<()> {
        let positions = self.engine.fetch_positions().await?;
        self.notifier.notify(Notification::daily_report(&positions));
        Ok(())
    }

    /// Deliver queued notifications. Call before the process exits.
    pub async fn shutdown(&self) {
        self.notifier.shutdown().await;
    }

    /// Drive the cycles at their cadences until `shutdown` flips to true.
    ///
    /// `capital` is spent at most once across the whole loop: each live
    /// strategy cycle deducts the deposits it submitted. Cycles run on this
    /// task one at a time, so two cycles of the same component never overlap.
    /// The first report goes out one report interval after start.
    pub async fn run_with_shutdown(
        &mut self,
        capital: Usd,
        dry_run: bool,
        mut shutdown: watch::Receiver<bool>,
    ) {
        info!(
            check_interval_secs = self.check_interval.as_secs(),
            risk_interval_secs = self.risk_interval.as_secs(),
            report_interval_secs = self.report_interval.as_secs(),
            %capital,
            dry_run,
            "Allocator loop started"
        );

        let mut remaining = capital;
        let mut strategy_tick = tokio::time::interval(self.check_interval);
        strategy_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut risk_tick = tokio::time::interval(self.risk_interval);
        risk_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut report_tick =
            tokio::time::interval_at(Instant::now() + self.report_interval, self.report_interval);
        report_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                _ = risk_tick.tick() => {
                    if let Err(e) = self.risk_cycle(dry_run).await {
                        error!(error = %e, "Risk cycle failed");
                        self.notifier.notify(Notification::cycle_failed("risk", &e));
                    }
                }
                _ = strategy_tick.tick() => {
                    match self.strategy_cycle(remaining, dry_run).await {
                        Ok(signals) if !dry_run => {
                            remaining = (remaining - total_deposits(&signals)).max(Usd::ZERO);
                            debug!(remaining = %remaining, "Capital left for later cycles");
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!(error = %e, "Strategy cycle failed");
                            self.notifier.notify(Notification::cycle_failed("strategy", &e));
                        }
                    }
                }
                _ = report_tick.tick() => {
                    if let Err(e) = self.report().await {
                        error!(error = %e, "Report failed");
                        self.notifier.notify(Notification::cycle_failed("report", &e));
                    }
                }
            }
        }
    }
}

/// Withdraw the full value of every held position.
fn exit_signals(positions: &[Position]) -> Vec<Signal> {
    positions
        .iter()
        .filter(|p| p.value_usd() > Usd::ZERO)
        .map(|p| {
            Signal::withdraw(
                p.market_key().clone(),
                p.name(),
                p.value_usd(),
                "emergency exit: stop-loss hit",
            )
            .with_priority(EMERGENCY_EXIT_PRIORITY)
        })
        .collect()
}

/// Log notifier plus any configured remote notifiers.
#[must_use]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));

    #[cfg(feature = "telegram")]
    if config.telegram.enabled {
        use crate::adapter::outbound::notifier::telegram::TelegramNotifier;

        match config.telegram_config() {
            Some(telegram) => {
                registry.register(Box::new(TelegramNotifier::new(telegram)));
                info!("Telegram notifier registered");
            }
            None => {
                warn!("Telegram enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID is missing");
            }
        }
    }

    #[cfg(not(feature = "telegram"))]
    if config.telegram.enabled {
        warn!("Telegram enabled but the telegram feature is not compiled in");
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exit_signals_skip_empty_positions() {
        let positions = vec![
            Position::new("0x1", "ETH-USDC").with_value(dec!(500)),
            Position::new("0x2", "BTC-USDC"),
        ];

        let exits = exit_signals(&positions);

        assert_eq!(exits.len(), 1);
        assert!(exits[0].is_withdraw());
        assert_eq!(exits[0].amount_usd(), dec!(500));
        assert_eq!(exits[0].priority(), EMERGENCY_EXIT_PRIORITY);
    }

    #[test]
    fn test_registry_always_has_log_notifier() {
        let registry = build_notifier_registry(&Config::default());
        assert_eq!(registry.len(), 1);
    }
}
