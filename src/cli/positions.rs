//! Handler for the `positions` command.

use std::sync::Arc;

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::adapter::outbound::executor::LoggingExecutor;
use crate::app::Config;
use crate::application::strategy::StrategyEngine;
use crate::cli::{output, SnapshotArg};
use crate::domain::money::Usd;
use crate::domain::position::portfolio_value;
use crate::domain::Position;
use crate::error::Result;

#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "Pool")]
    name: String,
    #[tabled(rename = "GM")]
    gm_balance: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Unrealized")]
    unrealized: String,
    #[tabled(rename = "Fees")]
    fees: String,
    #[tabled(rename = "Total PnL")]
    total_pnl: String,
}

impl From<&Position> for PositionRow {
    fn from(p: &Position) -> Self {
        Self {
            name: p.name().to_string(),
            gm_balance: format!("{:.4}", p.gm_balance()),
            value: format!("${:.2}", p.value_usd()),
            unrealized: signed_usd(p.unrealized_pnl()),
            fees: format!("${:.2}", p.fees_earned()),
            total_pnl: signed_usd(p.total_pnl()),
        }
    }
}

#[derive(Serialize)]
struct PositionsOutput<'a> {
    wallet: Option<&'a str>,
    positions: &'a [Position],
    total_value_usd: Usd,
    total_pnl_usd: Usd,
}

fn signed_usd(amount: Usd) -> String {
    if amount.is_sign_negative() {
        format!("-${:.2}", amount.abs())
    } else {
        format!("+${amount:.2}")
    }
}

/// Print the configured wallet's positions with value and PnL.
pub async fn execute(config: &Config, args: &SnapshotArg) -> Result<()> {
    let engine = StrategyEngine::from_name(
        &config.strategy.strategy_type,
        config.strategy_settings(),
        Arc::new(args.load()?),
        Arc::new(LoggingExecutor),
    )?
    .with_wallet(config.wallet.address.clone());
    let positions = engine.fetch_positions().await?;
    let total_value = portfolio_value(&positions);
    let total_pnl: Usd = positions.iter().map(Position::total_pnl).sum();

    if output::is_json() {
        return output::json(&PositionsOutput {
            wallet: engine.wallet(),
            positions: &positions,
            total_value_usd: total_value,
            total_pnl_usd: total_pnl,
        });
    }

    output::header();
    let Some(wallet) = engine.wallet() else {
        output::warning("No wallet address configured");
        return Ok(());
    };
    output::field("Wallet", wallet);
    output::section("Positions");
    if positions.is_empty() {
        output::note("No positions");
        return Ok(());
    }

    let rows: Vec<PositionRow> = positions.iter().map(PositionRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    output::field("Total value", format!("${total_value:.2}"));
    output::field(
        "Total PnL",
        output::signed(signed_usd(total_pnl), total_pnl.is_sign_negative()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_usd() {
        assert_eq!(signed_usd(dec!(42.1)), "+$42.10");
        assert_eq!(signed_usd(dec!(-120)), "-$120.00");
        assert_eq!(signed_usd(Usd::ZERO), "+$0.00");
    }

    #[test]
    fn test_row_shows_total_pnl_with_fees() {
        let position = Position::new("0x1", "ETH-USDC")
            .with_holding(dec!(1700), dec!(2500))
            .with_cost(dec!(2400), dec!(100))
            .with_realized(Usd::ZERO, dec!(42.10));

        let row = PositionRow::from(&position);

        assert_eq!(row.gm_balance, "1700.0000");
        assert_eq!(row.value, "$2500.00");
        assert_eq!(row.unrealized, "+$100.00");
        assert_eq!(row.fees, "$42.10");
        assert_eq!(row.total_pnl, "+$142.10");
    }
}
