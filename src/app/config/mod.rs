//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable overrides
//! for sensitive values like `WALLET_PRIVATE_KEY`. Every section has defaults,
//! so an empty file is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use gmx_allocator::app::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

mod logging;
mod pools;
mod risk;
mod service;
mod strategy;

pub use logging::LoggingConfig;
pub use pools::PoolsConfig;
pub use risk::RiskConfig;
pub use service::{ExecutionConfig, TelegramAppConfig, WalletConfig};
pub use strategy::StrategyConfig;

use crate::application::risk::RiskSettings;
use crate::application::strategy::{RiskLimits, StrategyRegistry, StrategySettings};
use crate::domain::RiskScoreParams;
use crate::error::{ConfigError, Result};

/// Raw risk-score penalty parameters, read from `[scoring]`.
pub type ScoringConfig = RiskScoreParams;

const fn default_dry_run() -> bool {
    true
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Generate and log signals without handing them to the executor.
    /// Defaults to true.
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Private key is loaded from `WALLET_PRIVATE_KEY` environment variable.
    #[serde(default)]
    pub wallet: WalletConfig,

    #[serde(default)]
    pub strategy: StrategyConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub pools: PoolsConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub execution: ExecutionConfig,

    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dry_run: default_dry_run(),
            logging: LoggingConfig::default(),
            wallet: WalletConfig::default(),
            strategy: StrategyConfig::default(),
            risk: RiskConfig::default(),
            pools: PoolsConfig::default(),
            scoring: ScoringConfig::default(),
            execution: ExecutionConfig::default(),
            telegram: TelegramAppConfig::default(),
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

impl Config {
    /// Parse configuration from TOML content, apply environment overrides,
    /// and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - An environment override is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or for any reason
    /// [`Config::parse_toml`] fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Overlay secrets and deployment values from the environment.
    ///
    /// Reads `WALLET_PRIVATE_KEY`, `WALLET_ADDRESS`, `TELEGRAM_BOT_TOKEN` and
    /// `TELEGRAM_CHAT_ID` through `lookup`. Empty values are ignored.
    #[allow(clippy::result_large_err)]
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Never from the config file.
        self.wallet.private_key = get("WALLET_PRIVATE_KEY");
        if let Some(address) = get("WALLET_ADDRESS") {
            self.wallet.address = Some(address);
        }
        if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = Some(token);
        }
        if let Some(chat_id) = get("TELEGRAM_CHAT_ID") {
            let chat_id = chat_id
                .trim()
                .parse()
                .map_err(|_| invalid("TELEGRAM_CHAT_ID", "must be an integer"))?;
            self.telegram.chat_id = Some(chat_id);
        }
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Checks that the strategy name is registered and that every threshold
    /// is within its acceptable range.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        let registry = StrategyRegistry::builtin();
        if !registry.contains(&self.strategy.strategy_type) {
            return Err(ConfigError::UnknownStrategy {
                name: self.strategy.strategy_type.clone(),
                available: registry.available(),
            }
            .into());
        }

        let strategy = &self.strategy;
        if strategy.min_apy < 0.0 {
            return Err(invalid("min_apy", "must be 0 or greater"));
        }
        if strategy.target_apy < 0.0 {
            return Err(invalid("target_apy", "must be 0 or greater"));
        }
        if strategy.max_single_pool_pct <= 0.0 || strategy.max_single_pool_pct > 100.0 {
            return Err(invalid("max_single_pool_pct", "must be in (0, 100]"));
        }
        if strategy.max_pools == 0 {
            return Err(invalid("max_pools", "must be greater than 0"));
        }
        if strategy.min_pools > strategy.max_pools {
            return Err(invalid("min_pools", "must be <= max_pools"));
        }
        if strategy.rebalance_threshold < 0.0 {
            return Err(invalid("rebalance_threshold", "must be 0 or greater"));
        }
        if strategy.switch_apy_multiplier < 1.0 {
            return Err(invalid("switch_apy_multiplier", "must be >= 1.0"));
        }

        let risk = &self.risk;
        if risk.max_position_usd <= Decimal::ZERO {
            return Err(invalid("max_position_usd", "must be greater than 0"));
        }
        if risk.min_position_usd < Decimal::ZERO {
            return Err(invalid("min_position_usd", "must be 0 or greater"));
        }
        if risk.min_position_usd > risk.max_position_usd {
            return Err(invalid("min_position_usd", "must be <= max_position_usd"));
        }
        if risk.max_drawdown_pct < 0.0 {
            return Err(invalid("max_drawdown_pct", "must be 0 or greater"));
        }
        if risk.stop_loss_pct < 0.0 {
            return Err(invalid("stop_loss_pct", "must be 0 or greater"));
        }
        if risk.stop_loss_pct < risk.max_drawdown_pct {
            return Err(invalid("stop_loss_pct", "must be >= max_drawdown_pct"));
        }
        if !(0.0..=1.0).contains(&risk.max_oi_imbalance) {
            return Err(invalid("max_oi_imbalance", "must be between 0 and 1"));
        }
        if risk.concentration_tolerance <= 0.0 {
            return Err(invalid("concentration_tolerance", "must be greater than 0"));
        }
        if risk.history_capacity == 0 {
            return Err(invalid("history_capacity", "must be greater than 0"));
        }

        if !(0.0..=1.0).contains(&self.scoring.high_utilization) {
            return Err(invalid("high_utilization", "must be between 0 and 1"));
        }

        if self.execution.check_interval_secs == 0 {
            return Err(invalid("check_interval_secs", "must be greater than 0"));
        }
        if self.execution.risk_interval_secs == 0 {
            return Err(invalid("risk_interval_secs", "must be greater than 0"));
        }
        if self.execution.report_interval_secs == 0 {
            return Err(invalid("report_interval_secs", "must be greater than 0"));
        }

        Ok(())
    }

    /// Check the credentials needed to hand signals to a live executor.
    #[allow(clippy::result_large_err)]
    pub fn validate_for_execution(&self) -> Result<()> {
        if self.wallet.private_key.is_none() {
            return Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            }
            .into());
        }
        if self.wallet.address.is_none() {
            return Err(ConfigError::MissingField {
                field: "wallet.address",
            }
            .into());
        }
        Ok(())
    }

    /// Parameters for the strategy engine.
    #[must_use]
    pub fn strategy_settings(&self) -> StrategySettings {
        StrategySettings {
            min_apy: self.strategy.min_apy,
            max_pools: self.strategy.max_pools,
            rebalance_threshold: self.strategy.rebalance_threshold,
            switch_apy_multiplier: self.strategy.switch_apy_multiplier,
            limits: RiskLimits {
                max_position_usd: self.risk.max_position_usd,
                min_position_usd: self.risk.min_position_usd,
                max_single_pool_pct: self.strategy.max_single_pool_pct,
            },
            filter: self.pools.clone().into(),
            risk_score: self.scoring.clone(),
        }
    }

    /// Parameters for the risk manager.
    #[must_use]
    pub fn risk_settings(&self) -> RiskSettings {
        RiskSettings {
            max_drawdown_pct: self.risk.max_drawdown_pct,
            stop_loss_pct: self.risk.stop_loss_pct,
            max_oi_imbalance: self.risk.max_oi_imbalance,
            min_apy: self.strategy.min_apy,
            max_single_pool_pct: self.strategy.max_single_pool_pct,
            concentration_tolerance: self.risk.concentration_tolerance,
            history_capacity: self.risk.history_capacity,
        }
    }

    /// Telegram notifier settings, when enabled and both secrets are present.
    #[cfg(feature = "telegram")]
    #[must_use]
    pub fn telegram_config(&self) -> Option<crate::adapter::outbound::notifier::telegram::TelegramConfig> {
        if !self.telegram.enabled {
            return None;
        }
        Some(crate::adapter::outbound::notifier::telegram::TelegramConfig {
            bot_token: self.telegram.bot_token.clone()?,
            chat_id: self.telegram.chat_id?,
            notify_info: self.telegram.notify_info,
        })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
