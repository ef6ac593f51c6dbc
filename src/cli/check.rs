//! Handler for the `check-config` command.

use std::path::Path;

use crate::app::Config;
use crate::application::strategy::StrategyRegistry;
use crate::cli::output;
use crate::error::Result;

/// Validate the configuration file without running any cycle.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    if output::is_json() {
        return output::json(&serde_json::json!({
            "valid": true,
            "path": path.display().to_string(),
            "strategy": config.strategy.strategy_type,
            "dry_run": config.dry_run,
        }));
    }

    output::header();
    output::success(&format!("Configuration is valid: {}", path.display()));

    output::section("Summary");
    let description = StrategyRegistry::builtin()
        .describe()
        .into_iter()
        .find(|(name, _)| *name == config.strategy.strategy_type)
        .map_or("", |(_, description)| description);
    output::field("Strategy", &config.strategy.strategy_type);
    output::note(description);
    output::field("Min APY", format!("{:.1}%", config.strategy.min_apy));
    output::field("Portfolio cap", format!("${}", config.risk.max_position_usd));
    output::field(
        "Single pool cap",
        format!("{:.1}%", config.strategy.max_single_pool_pct),
    );
    output::field("Stop loss", format!("{:.1}%", config.risk.stop_loss_pct));
    output::field(
        "Cadence",
        format!(
            "strategy {}s, risk {}s",
            config.execution.check_interval_secs, config.execution.risk_interval_secs
        ),
    );
    output::field("Dry-run", config.dry_run);

    output::section("Credentials");
    match &config.wallet.address {
        Some(address) => output::success(&format!("Wallet address {address}")),
        None => output::warning("No wallet address: positions are assumed empty"),
    }
    if config.wallet.private_key.is_some() {
        output::success("Wallet private key found (from WALLET_PRIVATE_KEY env var)");
    } else if !config.dry_run {
        output::warning("No wallet private key: set WALLET_PRIVATE_KEY for live execution");
    }

    if config.telegram.enabled {
        let mut missing = Vec::new();
        if config.telegram.bot_token.is_none() {
            missing.push("TELEGRAM_BOT_TOKEN");
        }
        if config.telegram.chat_id.is_none() {
            missing.push("TELEGRAM_CHAT_ID");
        }
        if missing.is_empty() {
            output::success("Telegram configured and enabled");
        } else {
            output::warning(&format!("Telegram enabled but missing {}", missing.join(", ")));
        }
    } else {
        output::note("Telegram: disabled");
    }

    Ok(())
}
