//! Wallet, scheduling and notification configuration.

use serde::Deserialize;
use std::time::Duration;

/// Wallet whose positions are managed.
/// Private key is loaded from `WALLET_PRIVATE_KEY` env var at runtime (never from config file).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Holder address. Without one, the allocator assumes no positions.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(skip)]
    pub private_key: Option<String>,
}

/// Cadence of the run loop.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    /// Seconds between strategy cycles (default: 300).
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// Seconds between risk checks (default: 60).
    #[serde(default = "default_risk_interval_secs")]
    pub risk_interval_secs: u64,
    /// Seconds between portfolio reports (default: 86400).
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,
}

const fn default_check_interval_secs() -> u64 {
    300
}

const fn default_risk_interval_secs() -> u64 {
    60
}

const fn default_report_interval_secs() -> u64 {
    86_400
}

impl ExecutionConfig {
    #[must_use]
    pub const fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    #[must_use]
    pub const fn risk_interval(&self) -> Duration {
        Duration::from_secs(self.risk_interval_secs)
    }

    #[must_use]
    pub const fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval_secs(),
            risk_interval_secs: default_risk_interval_secs(),
            report_interval_secs: default_report_interval_secs(),
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Telegram notification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Enable telegram notifications.
    #[serde(default)]
    pub enabled: bool,
    /// Send info-level notifications such as submitted signals.
    #[serde(default = "default_true")]
    pub notify_info: bool,
    /// Loaded from `TELEGRAM_BOT_TOKEN`.
    #[serde(skip)]
    pub bot_token: Option<String>,
    /// Loaded from `TELEGRAM_CHAT_ID`.
    #[serde(skip)]
    pub chat_id: Option<i64>,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            notify_info: default_true(),
            bot_token: None,
            chat_id: None,
        }
    }
}
