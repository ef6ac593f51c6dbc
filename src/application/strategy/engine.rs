//! Strategy engine: runs one allocation decision cycle.
//!
//! A cycle fetches markets, pool stats and positions, asks the active
//! strategy for signals, filters them through the risk limits, and hands the
//! accepted signals to the executor unless running dry.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{StatsByKey, Strategy, StrategyRegistry, StrategySettings};
use crate::domain::money::Usd;
use crate::domain::{Market, MarketKey, Position, Signal};
use crate::error::Result;
use crate::port::outbound::data::PoolDataSource;
use crate::port::outbound::executor::SignalExecutor;

/// One row of the pool ranking table.
#[derive(Debug, Clone, Serialize)]
pub struct PoolRanking {
    pub name: String,
    pub market_key: MarketKey,
    pub apy: f64,
    pub tvl: Usd,
    pub oi_imbalance: f64,
    pub score: f64,
    pub yield_score: f64,
    pub risk_score: f64,
    pub liquidity_score: f64,
    pub balance_score: f64,
}

/// Snapshot of engine state for observability.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub strategy: &'static str,
    pub description: &'static str,
    pub last_run: Option<DateTime<Utc>>,
    pub signals_count: usize,
    pub min_apy: f64,
    pub max_position_usd: Usd,
    pub check_interval_secs: u64,
}

/// Orchestrates strategy cycles against a data source and an executor.
///
/// Single caller: cycles take `&mut self` and never overlap.
pub struct StrategyEngine {
    strategy: Box<dyn Strategy>,
    data: Arc<dyn PoolDataSource>,
    executor: Arc<dyn SignalExecutor>,
    wallet: Option<String>,
    check_interval: Duration,
    last_run: Option<DateTime<Utc>>,
    history: Vec<Signal>,
}

impl StrategyEngine {
    /// Default cadence of strategy cycles.
    pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(300);

    pub fn new(
        strategy: Box<dyn Strategy>,
        data: Arc<dyn PoolDataSource>,
        executor: Arc<dyn SignalExecutor>,
    ) -> Self {
        info!(
            strategy = strategy.name(),
            description = strategy.description(),
            "Strategy loaded"
        );
        Self {
            strategy,
            data,
            executor,
            wallet: None,
            check_interval: Self::DEFAULT_CHECK_INTERVAL,
            last_run: None,
            history: Vec::new(),
        }
    }

    /// Build an engine for a strategy selected by name.
    ///
    /// Fails with an unknown-strategy configuration error before any cycle runs.
    pub fn from_name(
        name: &str,
        settings: StrategySettings,
        data: Arc<dyn PoolDataSource>,
        executor: Arc<dyn SignalExecutor>,
    ) -> Result<Self> {
        let strategy = StrategyRegistry::builtin().create(name, settings)?;
        Ok(Self::new(strategy, data, executor))
    }

    /// Wallet whose positions are fetched each cycle. Empty addresses are ignored.
    #[must_use]
    pub fn with_wallet(mut self, address: Option<String>) -> Self {
        self.wallet = address.filter(|a| !a.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    #[must_use]
    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    #[must_use]
    pub fn wallet(&self) -> Option<&str> {
        self.wallet.as_deref()
    }

    #[must_use]
    pub const fn last_run(&self) -> Option<DateTime<Utc>> {
        self.last_run
    }

    /// Accepted signals from every cycle so far, oldest first.
    #[must_use]
    pub fn signal_history(&self) -> &[Signal] {
        &self.history
    }

    /// Run one decision cycle.
    ///
    /// Returns the accepted, priority-ordered signals whether or not the run
    /// is dry. Data source failures propagate; risk rejections are logged and
    /// dropped.
    #[instrument(name = "strategy_cycle", skip(self), fields(cycle_id = %Uuid::new_v4()))]
    pub async fn run(&mut self, available_capital: Usd, dry_run: bool) -> Result<Vec<Signal>> {
        info!(
            strategy = self.strategy.name(),
            available_capital = %available_capital,
            dry_run,
            "Starting strategy cycle"
        );

        let (markets, stats) = self.fetch_market_data().await?;
        let positions = self.fetch_positions().await?;

        let signals =
            self.strategy
                .generate_signals(&markets, &stats, &positions, available_capital);
        info!(count = signals.len(), "Signals generated");

        let accepted = self.filter_signals(signals, &positions);

        if !dry_run && !accepted.is_empty() {
            info!(
                executor = self.executor.name(),
                count = accepted.len(),
                "Submitting signals"
            );
            self.executor.submit(accepted.clone());
        }

        self.last_run = Some(Utc::now());
        self.history.extend(accepted.iter().cloned());

        Ok(accepted)
    }

    /// Score every filtered pool with stats, best first.
    pub async fn get_pool_rankings(&self) -> Result<Vec<PoolRanking>> {
        let (markets, stats) = self.fetch_market_data().await?;

        let mut rankings: Vec<PoolRanking> = self
            .strategy
            .score_candidates(&markets, &stats)
            .into_iter()
            .map(|score| {
                let sub = *score.sub_scores();
                PoolRanking {
                    name: score.name().to_string(),
                    market_key: score.market_key().clone(),
                    apy: score.apy(),
                    tvl: score.market().pool_tvl(),
                    oi_imbalance: score.market().oi_imbalance(),
                    score: score.total(),
                    yield_score: sub.yield_score,
                    risk_score: sub.risk,
                    liquidity_score: sub.liquidity,
                    balance_score: sub.balance,
                }
            })
            .collect();

        rankings.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(rankings)
    }

    #[must_use]
    pub fn get_status(&self) -> EngineStatus {
        let settings = self.strategy.settings();
        EngineStatus {
            strategy: self.strategy.name(),
            description: self.strategy.description(),
            last_run: self.last_run,
            signals_count: self.history.len(),
            min_apy: settings.min_apy,
            max_position_usd: settings.limits.max_position_usd,
            check_interval_secs: self.check_interval.as_secs(),
        }
    }

    /// Markets and the stats available for them.
    pub async fn fetch_market_data(&self) -> Result<(Vec<Market>, StatsByKey)> {
        let markets = self.data.list_markets().await?;
        info!(source = self.data.name(), count = markets.len(), "Markets fetched");

        let mut stats = StatsByKey::with_capacity(markets.len());
        for market in &markets {
            match self.data.get_pool_stats(market.key()).await? {
                Some(pool_stats) => {
                    stats.insert(market.key().clone(), pool_stats);
                }
                None => debug!(market = %market.key(), "No stats for market"),
            }
        }
        info!(count = stats.len(), "Pool stats fetched");

        Ok((markets, stats))
    }

    /// Positions of the configured wallet; empty without a wallet.
    pub async fn fetch_positions(&self) -> Result<Vec<Position>> {
        let Some(address) = self.wallet.as_deref() else {
            debug!("No wallet configured, assuming no positions");
            return Ok(Vec::new());
        };

        let positions = self.data.get_positions(address).await?;
        info!(count = positions.len(), "Positions fetched");
        for position in &positions {
            debug!(
                market = %position.name(),
                gm_balance = %position.gm_balance(),
                value_usd = %position.value_usd(),
                "Position"
            );
        }
        Ok(positions)
    }

    fn filter_signals(&self, signals: Vec<Signal>, positions: &[Position]) -> Vec<Signal> {
        let mut accepted = Vec::with_capacity(signals.len());
        for signal in signals {
            match self.strategy.check_risk_limits(&signal, positions).rejection() {
                Some(reason) => {
                    warn!(signal = %signal, reason = %reason, "Signal rejected");
                }
                None => {
                    info!(signal = %signal, "Signal accepted");
                    accepted.push(signal);
                }
            }
        }
        accepted
    }
}
