//! Allocation signals produced by strategies.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::MarketKey;
use super::money::Usd;

/// Direction of a recommended allocation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalAction {
    Deposit,
    Withdraw,
}

impl SignalAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommended deposit into or withdrawal from one pool.
///
/// Lower `priority` means more urgent. `confidence` is always in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    action: SignalAction,
    market_key: MarketKey,
    market_name: String,
    amount_usd: Usd,
    reason: String,
    priority: u8,
    confidence: f64,
}

impl Signal {
    /// Default priority for signals that do not set one.
    pub const DEFAULT_PRIORITY: u8 = 1;
    /// Default confidence for signals that do not set one.
    pub const DEFAULT_CONFIDENCE: f64 = 0.5;

    pub fn new(
        action: SignalAction,
        market_key: MarketKey,
        market_name: impl Into<String>,
        amount_usd: Usd,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            action,
            market_key,
            market_name: market_name.into(),
            amount_usd,
            reason: reason.into(),
            priority: Self::DEFAULT_PRIORITY,
            confidence: Self::DEFAULT_CONFIDENCE,
        }
    }

    pub fn deposit(
        market_key: MarketKey,
        market_name: impl Into<String>,
        amount_usd: Usd,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(SignalAction::Deposit, market_key, market_name, amount_usd, reason)
    }

    pub fn withdraw(
        market_key: MarketKey,
        market_name: impl Into<String>,
        amount_usd: Usd,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(SignalAction::Withdraw, market_key, market_name, amount_usd, reason)
    }

    #[must_use]
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Set confidence, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        self
    }

    #[must_use]
    pub const fn action(&self) -> SignalAction {
        self.action
    }

    #[must_use]
    pub fn is_deposit(&self) -> bool {
        self.action == SignalAction::Deposit
    }

    #[must_use]
    pub fn is_withdraw(&self) -> bool {
        self.action == SignalAction::Withdraw
    }

    #[must_use]
    pub const fn market_key(&self) -> &MarketKey {
        &self.market_key
    }

    #[must_use]
    pub fn market_name(&self) -> &str {
        &self.market_name
    }

    #[must_use]
    pub const fn amount_usd(&self) -> Usd {
        self.amount_usd
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[must_use]
    pub const fn priority(&self) -> u8 {
        self.priority
    }

    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: ${:.2} ({})",
            self.action.as_str().to_uppercase(),
            self.market_name,
            self.amount_usd,
            self.reason
        )
    }
}

/// Total USD amount across deposit signals.
#[must_use]
pub fn total_deposits(signals: &[Signal]) -> Usd {
    signals
        .iter()
        .filter(|s| s.is_deposit())
        .map(Signal::amount_usd)
        .sum::<Decimal>()
}
