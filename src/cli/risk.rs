//! Handler for the `risk` command.

use std::sync::Arc;

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::adapter::outbound::executor::LoggingExecutor;
use crate::app::{build_notifier_registry, Allocator, Config};
use crate::application::risk::RiskSummary;
use crate::cli::{output, SnapshotArg};
use crate::domain::RiskAlert;
use crate::error::Result;

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Pool")]
    pool: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&RiskAlert> for AlertRow {
    fn from(alert: &RiskAlert) -> Self {
        Self {
            severity: format!("{} {}", alert.severity().emoji(), alert.severity()),
            category: alert.category().to_string(),
            pool: alert.market_name().unwrap_or("-").to_string(),
            message: alert.message().to_string(),
        }
    }
}

#[derive(Serialize)]
struct RiskOutput<'a> {
    summary: &'a RiskSummary,
    alerts: &'a [RiskAlert],
    emergency_exit: bool,
}

/// Check current positions once and print alerts and the portfolio summary.
///
/// Never hands withdrawals to the executor.
pub async fn execute(config: &Config, args: &SnapshotArg) -> Result<()> {
    let notifier = Arc::new(build_notifier_registry(config));
    let mut allocator = Allocator::from_config(
        config,
        Arc::new(args.load()?),
        Arc::new(LoggingExecutor),
        notifier,
    )?;

    let result = allocator.risk_cycle(true).await;
    allocator.shutdown().await;
    let report = result?;
    let summary = allocator.risk_manager().get_risk_summary(&report.positions);

    if output::is_json() {
        return output::json(&RiskOutput {
            summary: &summary,
            alerts: &report.alerts,
            emergency_exit: report.emergency_exit,
        });
    }

    output::header();
    output::section("Portfolio");
    output::field("Positions", report.positions.len());
    output::field("Total value", format!("${:.2}", summary.total_value_usd));
    output::field(
        "Total PnL",
        output::signed(
            format!("${:.2} ({:.2}%)", summary.total_pnl_usd, summary.overall_pnl_pct),
            summary.total_pnl_usd.is_sign_negative(),
        ),
    );
    output::field(
        "Concentration",
        format!("{:.1}%", summary.max_concentration_pct),
    );
    output::field("Risk level", output::highlight(summary.risk_level));

    output::section("Alerts");
    if report.alerts.is_empty() {
        output::success("No risk alerts");
    } else {
        let rows: Vec<AlertRow> = report.alerts.iter().map(AlertRow::from).collect();
        output::lines(&Table::new(rows).to_string());
    }

    if report.emergency_exit {
        output::warning("Stop-loss hit: emergency exit recommended");
    }
    Ok(())
}
