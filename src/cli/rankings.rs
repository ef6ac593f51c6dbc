//! Handler for the `rankings` command.

use std::sync::Arc;

use tabled::{Table, Tabled};

use crate::adapter::outbound::executor::LoggingExecutor;
use crate::application::strategy::{PoolRanking, StrategyEngine};
use crate::app::Config;
use crate::cli::{output, SnapshotArg};
use crate::error::Result;

#[derive(Tabled)]
struct RankingRow {
    #[tabled(rename = "Pool")]
    name: String,
    #[tabled(rename = "APY")]
    apy: String,
    #[tabled(rename = "TVL")]
    tvl: String,
    #[tabled(rename = "Imbalance")]
    imbalance: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Yield")]
    yield_score: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Liquidity")]
    liquidity: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

impl From<&PoolRanking> for RankingRow {
    fn from(r: &PoolRanking) -> Self {
        Self {
            name: r.name.clone(),
            apy: format!("{:.1}%", r.apy),
            tvl: format!("${:.0}", r.tvl),
            imbalance: format!("{:.2}", r.oi_imbalance),
            score: format!("{:.1}", r.score),
            yield_score: format!("{:.1}", r.yield_score),
            risk: format!("{:.1}", r.risk_score),
            liquidity: format!("{:.1}", r.liquidity_score),
            balance: format!("{:.1}", r.balance_score),
        }
    }
}

/// Score and print every eligible pool, best first.
pub async fn execute(config: &Config, args: &SnapshotArg) -> Result<()> {
    let engine = StrategyEngine::from_name(
        &config.strategy.strategy_type,
        config.strategy_settings(),
        Arc::new(args.load()?),
        Arc::new(LoggingExecutor),
    )?;
    let rankings = engine.get_pool_rankings().await?;

    if output::is_json() {
        return output::json(&rankings);
    }

    output::header();
    output::field("Strategy", engine.strategy().name());
    output::section("Pool rankings");
    if rankings.is_empty() {
        output::note("No eligible pools with stats");
        return Ok(());
    }

    let rows: Vec<RankingRow> = rankings.iter().map(RankingRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
