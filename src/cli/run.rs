//! Handler for the `run` command.

use std::sync::Arc;

use tabled::{Table, Tabled};
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

use crate::adapter::outbound::executor::LoggingExecutor;
use crate::app::{build_notifier_registry, Allocator, Config};
use crate::cli::{output, RunArgs};
use crate::domain::Signal;
use crate::error::Result;

#[derive(Tabled)]
struct SignalRow {
    #[tabled(rename = "#")]
    priority: u8,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Pool")]
    pool: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&Signal> for SignalRow {
    fn from(signal: &Signal) -> Self {
        Self {
            priority: signal.priority(),
            action: signal.action().to_string(),
            pool: signal.market_name().to_string(),
            amount: format!("${:.2}", signal.amount_usd()),
            reason: signal.reason().to_string(),
        }
    }
}

/// Execute the run command.
pub async fn execute(config: Config, args: &RunArgs) -> Result<()> {
    let dry_run = config.dry_run || args.dry_run;
    if !dry_run {
        config.validate_for_execution()?;
    }

    let data = Arc::new(args.data.load()?);
    let notifier = Arc::new(build_notifier_registry(&config));
    let mut allocator = Allocator::from_config(&config, data, Arc::new(LoggingExecutor), notifier)?;

    info!(
        strategy = %config.strategy.strategy_type,
        capital = %args.capital,
        dry_run,
        "gmx-allocator starting"
    );

    if args.run_loop {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                let _ = shutdown_tx.send(true);
            }
        });
        allocator
            .run_with_shutdown(args.capital, dry_run, shutdown_rx)
            .await;
        allocator.shutdown().await;
        info!("gmx-allocator stopped");
        return Ok(());
    }

    let result = allocator.strategy_cycle(args.capital, dry_run).await;
    allocator.shutdown().await;
    print_signals(&result?, dry_run)
}

fn print_signals(signals: &[Signal], dry_run: bool) -> Result<()> {
    if output::is_json() {
        return output::json(&signals);
    }

    output::header();
    output::section(if dry_run { "Signals (dry run)" } else { "Signals" });
    if signals.is_empty() {
        output::note("No signals this cycle");
        return Ok(());
    }

    let rows: Vec<SignalRow> = signals.iter().map(SignalRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    if dry_run {
        output::note("Dry run: nothing was handed to the executor");
    } else {
        output::success(&format!("{} signal(s) submitted", signals.len()));
    }
    Ok(())
}
